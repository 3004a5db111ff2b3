//! Hero entrance timeline
//!
//! Navigation, logo and title start together. The subtitle, description and
//! call to action then overlap the step before each of them.

use folio_animation::{AnimationEngine, Completion, MotionPath, Position, TextReveal, Timeline, Tween};
use folio_core::Point;

use crate::config::EntranceConfig;
use crate::loader::LoadingComplete;

/// Build the entrance timeline
pub fn build_entrance_timeline(config: &EntranceConfig) -> Timeline {
    let path = MotionPath::new(config.logo_path.iter().map(|&[x, y]| Point::new(x, y)))
        .curviness(config.logo_curviness);

    let reveal = |selector: &str, duration: f32| {
        Tween::to(selector)
            .opacity(1.0)
            .blur(0.0)
            .y(0.0)
            .duration(duration)
            .ease(config.reveal_ease)
    };

    Timeline::labeled("entrance")
        .then_at(
            Tween::to("nav")
                .y(0.0)
                .duration(config.nav_duration)
                .ease(config.nav_ease),
            Position::Absolute(0.0),
        )
        .then_at(
            Tween::to(".path-anim")
                .motion_path(path)
                .duration(config.logo_duration)
                .ease(config.logo_ease),
            Position::WithPrevious(0.0),
        )
        .then_at(
            reveal(".hero-title", config.title_duration),
            Position::WithPrevious(0.0),
        )
        .then_at(
            reveal(".hero-subtitle", config.subtitle_duration)
                .text(TextReveal::characters(config.subtitle_text.as_str())),
            config.subtitle_position,
        )
        .then_at(
            reveal(".hero-description", config.description_duration),
            config.description_position,
        )
        .then_at(reveal(".cta-button", config.cta_duration), config.cta_position)
}

/// Hand the entrance timeline to the engine
pub fn play_entrance(
    engine: &dyn AnimationEngine,
    config: &EntranceConfig,
    _loaded: &LoadingComplete,
) -> Completion {
    tracing::info!("playing entrance timeline");
    engine.play_timeline(build_entrance_timeline(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_order_and_offsets() {
        let timeline = build_entrance_timeline(&EntranceConfig::default());
        let targets: Vec<String> = timeline
            .entries()
            .iter()
            .map(|e| e.tween.targets.describe())
            .collect();
        assert_eq!(
            targets,
            [
                "nav",
                ".path-anim",
                ".hero-title",
                ".hero-subtitle",
                ".hero-description",
                ".cta-button"
            ]
        );

        let starts: Vec<f32> = timeline.entries().iter().map(|e| e.start).collect();
        let expected = [0.0, 0.0, 0.0, 0.7, 2.3, 2.8];
        for (start, want) in starts.iter().zip(expected) {
            assert!((start - want).abs() < 1e-5, "{starts:?}");
        }
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_subtitle_is_revealed_verbatim() {
        let config = EntranceConfig::default();
        let timeline = build_entrance_timeline(&config);
        let subtitle = &timeline.entries()[3].tween;
        let reveal = subtitle.text.as_ref().unwrap();
        assert_eq!(reveal.value, config.subtitle_text);
        assert_eq!(reveal.render("", 1.0), "Capturing stories through the lens â€“ not_so_graphy");
    }

    #[test]
    fn test_logo_follows_configured_path() {
        let timeline = build_entrance_timeline(&EntranceConfig::default());
        let logo = &timeline.entries()[1].tween;
        let path = logo.motion_path.as_ref().unwrap();
        assert_eq!(path.points.len(), 4);
        assert_eq!(path.curviness, 1.5);
        assert_eq!(logo.easing.to_string(), "elastic.out(1, 0.5)");
    }
}
