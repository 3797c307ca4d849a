// ABOUTME: End-to-end theme generation tests over the built-in palettes and token table
// ABOUTME: Checks coverage, alias propagation, reported and logged findings, and cache reuse across runs

use chromaforge_types::{Color, ColorMode, SurfaceKind};

use crate::{
    Engine, EngineConfig, EngineError, Palette, PaletteError, TokenMeta, generate_theme,
};

fn engine(mode: ColorMode) -> Engine {
    Engine::new(EngineConfig {
        color_mode: mode,
        ..Default::default()
    })
    .unwrap()
}

mod builtin_palettes {
    use super::*;

    #[test]
    fn test_dark_default_theme() {
        let theme = engine(ColorMode::Srgb)
            .generate(&Palette::dark_default())
            .unwrap();

        assert!(theme.dark);
        assert_eq!(theme.tokens.len(), 100);
        assert_eq!(theme.get("editor.background"), Some("#1e1e2e"));
        assert_eq!(theme.get("editorWidget.background"), Some("#29293a"));
        assert_eq!(theme.get("quickInput.background"), Some("#303042"));
        assert_eq!(theme.get("editor.selectionBackground"), Some("#89b4fa40"));
        assert_eq!(theme.get("statusBar.foreground"), Some("#999fb9"));
        assert_eq!(theme.get("button.foreground"), Some("#000000"));
    }

    #[test]
    fn test_light_default_theme() {
        let theme = engine(ColorMode::Srgb)
            .generate(&Palette::light_default())
            .unwrap();

        assert!(!theme.dark);
        assert_eq!(theme.get("editor.background"), Some("#eff1f5"));
        assert_eq!(theme.get("editorWidget.background"), Some("#e5e7ed"));
        assert_eq!(theme.get("button.foreground"), Some("#ffffff"));
        assert_eq!(theme.get("widget.shadow"), Some("#00000033"));
    }

    #[test]
    fn test_builtin_themes_validate_cleanly_in_both_modes() {
        for mode in [ColorMode::Srgb, ColorMode::Perceptual] {
            let engine = engine(mode);
            for palette in [Palette::dark_default(), Palette::light_default()] {
                let theme = engine.generate(&palette).unwrap();
                let report = &theme.report;
                assert!(report.is_valid(), "{mode}: {:?}", report.violations);
                assert!(report.contrast_warnings.is_empty(), "{mode}: {:?}", report.contrast_warnings);
                assert!(report.coverage.is_complete(), "{mode}: {:?}", report.coverage);
            }
        }
    }

    #[test]
    fn test_every_color_is_hex() {
        let theme = engine(ColorMode::Perceptual)
            .generate(&Palette::dark_default())
            .unwrap();
        for (key, value) in &theme.tokens {
            assert!(
                value.starts_with('#') && Color::parse(value).is_ok(),
                "{key} = {value}"
            );
        }
    }

    #[test]
    fn test_deprecated_aliases_follow_targets() {
        let theme = engine(ColorMode::Srgb)
            .generate(&Palette::dark_default())
            .unwrap();
        assert_eq!(
            theme.get("editorIndentGuide.background"),
            theme.get("editorIndentGuide.background1")
        );
        assert_eq!(
            theme.get("editorIndentGuide.activeBackground"),
            theme.get("editorIndentGuide.activeBackground1")
        );
    }

    #[test]
    fn test_generate_theme_shortcut() {
        let theme = generate_theme(&Palette::dark_default(), ColorMode::Srgb).unwrap();
        let direct = engine(ColorMode::Srgb)
            .generate(&Palette::dark_default())
            .unwrap();
        assert_eq!(theme.tokens, direct.tokens);
    }
}

mod findings {
    use super::*;

    #[test]
    fn test_low_contrast_palette_still_generates() {
        // #3a3a4a on #1e1e2e is about 1.5:1
        let palette = Palette::from_colors([
            ("bg.base", Color::rgb(0x1e, 0x1e, 0x2e)),
            ("text.primary", Color::rgb(0x3a, 0x3a, 0x4a)),
            ("accent", Color::rgb(0x89, 0xb4, 0xfa)),
        ])
        .unwrap();

        let theme = engine(ColorMode::Srgb).generate(&palette).unwrap();
        assert_eq!(theme.get("foreground"), Some("#3a3a4a"));

        let warning = theme
            .report
            .contrast_warnings
            .iter()
            .find(|w| w.key == "foreground")
            .expect("foreground should be flagged");
        assert_eq!(warning.background_key, "editor.background");
        assert_eq!(warning.required, 4.5);
        assert!(warning.ratio < 2.0);
        assert!(theme.report.is_valid());
    }

    #[test]
    fn test_translucent_override_violates_opaque_tokens() {
        let mut palette = Palette::dark_default();
        palette.set("border", Color::rgba(0xff, 0x00, 0x00, 0x80));

        let theme = engine(ColorMode::Srgb).generate(&palette).unwrap();
        assert_eq!(theme.get("contrastBorder"), Some("#ff000080"));
        assert!(!theme.report.is_valid());
        assert!(
            theme
                .report
                .violations
                .iter()
                .any(|v| v.key == "contrastBorder" && v.value == "#ff000080")
        );
        assert!(theme.report.summary().starts_with("Theme validation: FAIL"));
    }

    #[test]
    fn test_custom_registry_tokens_show_as_missing() {
        let mut engine = engine(ColorMode::Srgb);
        engine
            .registry_mut()
            .add(TokenMeta::new("minimap.background").surface(SurfaceKind::Editor));

        let theme = engine.generate(&Palette::dark_default()).unwrap();
        assert_eq!(theme.report.coverage.missing_from_theme, vec!["minimap.background"]);
        assert!(theme.report.coverage.unknown_to_registry.is_empty());
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_palette_errors_pass_through() {
        let err = Palette::from_toml_str("accent = \"#89b4fa\"").unwrap_err();
        assert!(matches!(err, PaletteError::MissingColor { ref name } if name == "bg.base"));

        let err = EngineError::from(err);
        assert_eq!(err.to_string(), "Palette is missing required color 'bg.base'");
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let config = EngineConfig {
            cache_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::InvalidConfig { reason }) if reason.contains("cache_capacity")
        ));

        let mut config = EngineConfig::default();
        config.thresholds.primary_min = f64::NAN;
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::InvalidConfig { .. })
        ));
    }
}

mod caching {
    use super::*;

    #[test]
    fn test_second_generation_reuses_cache() {
        let engine = engine(ColorMode::Perceptual);
        let first = engine.generate(&Palette::dark_default()).unwrap();
        let misses = engine.cache_stats().misses;
        assert!(misses > 0);

        let second = engine.generate(&Palette::dark_default()).unwrap();
        assert_eq!(first.tokens, second.tokens);
        assert_eq!(engine.cache_stats().misses, misses);
        assert!(engine.cache_stats().hits > 0);

        let stats = engine.generation_stats().unwrap();
        assert_eq!(stats.count, 2);
        assert!(stats.max <= stats.total);
    }

    #[test]
    fn test_reset_clears_cache_and_stats() {
        let engine = engine(ColorMode::Srgb);
        engine.generate(&Palette::light_default()).unwrap();
        assert!(engine.operations().cache_len() > 0);

        engine.reset();
        assert_eq!(engine.operations().cache_len(), 0);
        assert!(engine.generation_stats().is_none());

        let again = engine.generate(&Palette::light_default()).unwrap();
        assert!(again.report.is_valid());
    }

    #[test]
    fn test_memoization_disabled() {
        let engine = Engine::new(EngineConfig {
            memoize: false,
            ..Default::default()
        })
        .unwrap();
        engine.generate(&Palette::dark_default()).unwrap();
        assert_eq!(engine.operations().cache_len(), 0);
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}

mod logging {
    use super::*;
    use chromaforge_logging::Level;
    use tracing_mock::{expect, subscriber};

    #[test]
    fn test_violations_are_logged_as_warnings() {
        let mut palette = Palette::dark_default();
        palette.set("border", Color::rgba(0xff, 0x00, 0x00, 0x80));
        let engine = engine(ColorMode::Srgb);

        let (subscriber, handle) = subscriber::mock()
            .event(
                expect::event().at_level(Level::WARN).with_fields(
                    expect::field("token")
                        .and(expect::field("policy"))
                        .and(expect::msg("Alpha policy violation")),
                ),
            )
            .with_filter(|meta| {
                meta.target() == "chromaforge::engine" && *meta.level() == Level::WARN
            })
            .run_with_handle();

        let theme = tracing::subscriber::with_default(subscriber, || {
            engine.generate(&palette).unwrap()
        });

        handle.assert_finished();
        assert!(!theme.report.is_valid());
    }
}
