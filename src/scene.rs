//! Scene flow
//!
//! The outer game flow - menu, cutscene reels, levels, credits - is a small
//! state machine driven by the frame loop. Every transition is listed in
//! one table (`advance`); there is no handler chaining, which keeps the
//! whole progression testable without a window.

/// A fixed run of cutscene frames played front to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reel {
    /// Opening cutscenes before level 1
    Intro,
    /// Single bridging cutscene after finishing the given level
    Interlude(u32),
    /// One-time bonus reel, played right after the level-2 interlude
    Bonus,
    /// End credits after the final level
    Credits,
}

impl Reel {
    /// Number of frames in this reel.
    pub fn frame_count(&self) -> usize {
        match self {
            Reel::Intro => 3,
            Reel::Interlude(_) => 1,
            Reel::Bonus => 17,
            Reel::Credits => 3,
        }
    }

    /// Display name of one frame, used to look up cutscene art.
    pub fn frame_name(&self, index: usize) -> String {
        match self {
            Reel::Intro => format!("intro_{}", index + 1),
            Reel::Interlude(level) => format!("interlude_{}", level),
            Reel::Bonus => format!("bonus_{}", index + 2),
            Reel::Credits => {
                const FRAMES: [&str; 3] = ["finale", "credits", "outro"];
                FRAMES[index.min(FRAMES.len() - 1)].to_string()
            }
        }
    }
}

/// One state of the outer game flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    MainMenu,
    Cutscene { reel: Reel, index: usize },
    Playing { level: u32 },
    Exited,
}

/// Inputs that drive scene transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    StartSelected,
    ExitSelected,
    CutsceneFinished,
    LevelCompleted,
}

/// Walks the campaign: menu, intro reel, levels bridged by interludes, a
/// one-time bonus reel after level 2's interlude, credits after the last
/// level, back to the menu.
pub struct SceneSequencer {
    scene: Scene,
    final_level: u32,
    bonus_reel_shown: bool,
}

impl SceneSequencer {
    /// `final_level` is the number of the last campaign level; completing
    /// it rolls the credits.
    pub fn new(final_level: u32) -> Self {
        Self {
            scene: Scene::MainMenu,
            final_level,
            bonus_reel_shown: false,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Apply one event and return the resulting scene. Events that mean
    /// nothing in the current scene are ignored.
    pub fn advance(&mut self, event: SceneEvent) -> Scene {
        self.scene = match (self.scene, event) {
            (Scene::MainMenu, SceneEvent::StartSelected) => Scene::Cutscene {
                reel: Reel::Intro,
                index: 0,
            },
            (Scene::MainMenu, SceneEvent::ExitSelected) => Scene::Exited,
            (Scene::Cutscene { reel, index }, SceneEvent::CutsceneFinished) => {
                if index + 1 < reel.frame_count() {
                    Scene::Cutscene {
                        reel,
                        index: index + 1,
                    }
                } else {
                    self.after_reel(reel)
                }
            }
            (Scene::Playing { level }, SceneEvent::LevelCompleted) => {
                if level >= self.final_level {
                    Scene::Cutscene {
                        reel: Reel::Credits,
                        index: 0,
                    }
                } else {
                    Scene::Cutscene {
                        reel: Reel::Interlude(level),
                        index: 0,
                    }
                }
            }
            (scene, _) => scene,
        };
        self.scene
    }

    /// Where a finished reel leads.
    fn after_reel(&mut self, reel: Reel) -> Scene {
        match reel {
            Reel::Intro => Scene::Playing { level: 1 },
            Reel::Interlude(2) if !self.bonus_reel_shown => {
                self.bonus_reel_shown = true;
                Scene::Cutscene {
                    reel: Reel::Bonus,
                    index: 0,
                }
            }
            Reel::Interlude(level) => Scene::Playing { level: level + 1 },
            Reel::Bonus => Scene::Playing { level: 3 },
            Reel::Credits => Scene::MainMenu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish_reel(seq: &mut SceneSequencer) {
        let reel = match seq.scene() {
            Scene::Cutscene { reel, .. } => reel,
            other => panic!("expected a cutscene, got {:?}", other),
        };
        for _ in 0..reel.frame_count() {
            seq.advance(SceneEvent::CutsceneFinished);
        }
    }

    #[test]
    fn test_menu_start_and_exit() {
        let mut seq = SceneSequencer::new(4);
        assert_eq!(seq.scene(), Scene::MainMenu);

        seq.advance(SceneEvent::StartSelected);
        assert_eq!(
            seq.scene(),
            Scene::Cutscene {
                reel: Reel::Intro,
                index: 0
            }
        );

        let mut seq = SceneSequencer::new(4);
        seq.advance(SceneEvent::ExitSelected);
        assert_eq!(seq.scene(), Scene::Exited);
    }

    #[test]
    fn test_full_campaign_walk() {
        let mut seq = SceneSequencer::new(4);
        seq.advance(SceneEvent::StartSelected);
        finish_reel(&mut seq); // intro
        assert_eq!(seq.scene(), Scene::Playing { level: 1 });

        seq.advance(SceneEvent::LevelCompleted);
        assert_eq!(
            seq.scene(),
            Scene::Cutscene {
                reel: Reel::Interlude(1),
                index: 0
            }
        );
        finish_reel(&mut seq);
        assert_eq!(seq.scene(), Scene::Playing { level: 2 });

        seq.advance(SceneEvent::LevelCompleted);
        finish_reel(&mut seq); // interlude 2 leads into the bonus reel
        assert_eq!(
            seq.scene(),
            Scene::Cutscene {
                reel: Reel::Bonus,
                index: 0
            }
        );
        finish_reel(&mut seq);
        assert_eq!(seq.scene(), Scene::Playing { level: 3 });

        seq.advance(SceneEvent::LevelCompleted);
        finish_reel(&mut seq);
        assert_eq!(seq.scene(), Scene::Playing { level: 4 });

        seq.advance(SceneEvent::LevelCompleted);
        assert_eq!(
            seq.scene(),
            Scene::Cutscene {
                reel: Reel::Credits,
                index: 0
            }
        );
        finish_reel(&mut seq);
        assert_eq!(seq.scene(), Scene::MainMenu);
    }

    #[test]
    fn test_bonus_reel_plays_once() {
        let mut seq = SceneSequencer::new(4);

        // First run up to the end of the level-2 interlude
        seq.advance(SceneEvent::StartSelected);
        finish_reel(&mut seq);
        seq.advance(SceneEvent::LevelCompleted);
        finish_reel(&mut seq);
        seq.advance(SceneEvent::LevelCompleted);
        finish_reel(&mut seq);
        assert!(matches!(
            seq.scene(),
            Scene::Cutscene {
                reel: Reel::Bonus,
                ..
            }
        ));
        finish_reel(&mut seq);

        // Finish the campaign and start over: no bonus the second time
        seq.advance(SceneEvent::LevelCompleted);
        finish_reel(&mut seq);
        seq.advance(SceneEvent::LevelCompleted);
        finish_reel(&mut seq);
        assert_eq!(seq.scene(), Scene::MainMenu);

        seq.advance(SceneEvent::StartSelected);
        finish_reel(&mut seq);
        seq.advance(SceneEvent::LevelCompleted);
        finish_reel(&mut seq);
        seq.advance(SceneEvent::LevelCompleted);
        finish_reel(&mut seq);
        assert_eq!(seq.scene(), Scene::Playing { level: 3 });
    }

    #[test]
    fn test_short_campaign_skips_missing_interludes() {
        let mut seq = SceneSequencer::new(1);
        seq.advance(SceneEvent::StartSelected);
        finish_reel(&mut seq);
        assert_eq!(seq.scene(), Scene::Playing { level: 1 });

        // Completing the only level goes straight to credits
        seq.advance(SceneEvent::LevelCompleted);
        assert!(matches!(
            seq.scene(),
            Scene::Cutscene {
                reel: Reel::Credits,
                ..
            }
        ));
    }

    #[test]
    fn test_unexpected_events_are_ignored() {
        let mut seq = SceneSequencer::new(4);
        seq.advance(SceneEvent::LevelCompleted);
        seq.advance(SceneEvent::CutsceneFinished);
        assert_eq!(seq.scene(), Scene::MainMenu);

        seq.advance(SceneEvent::StartSelected);
        let scene = seq.scene();
        seq.advance(SceneEvent::StartSelected);
        assert_eq!(seq.scene(), scene);
    }

    #[test]
    fn test_reel_frame_names() {
        assert_eq!(Reel::Intro.frame_name(0), "intro_1");
        assert_eq!(Reel::Intro.frame_name(2), "intro_3");
        assert_eq!(Reel::Interlude(2).frame_name(0), "interlude_2");
        assert_eq!(Reel::Bonus.frame_name(0), "bonus_2");
        assert_eq!(Reel::Bonus.frame_name(16), "bonus_18");
        assert_eq!(Reel::Credits.frame_name(2), "outro");
    }
}
