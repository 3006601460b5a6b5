// Chirilica Integration Tests
//
// These tests verify the complete pipeline:
// key event -> Engine -> TextBuffer
//
// Run with: cargo test --test integration_test

mod tests {
    use chirilica_core::buffer::{self, TextBuffer};
    use chirilica_core::glyph::{GlyphTable, GlyphTables, PRIMARY_ENTRIES};
    use chirilica_core::transform::compose;
    use chirilica_core::{
        Engine, EngineConfig, KeyEvent, KeyOutcome, MarkKey, NativeInput, PanelKey, Selection,
        Switch, TextField,
    };

    const ACUTE: char = '\u{0301}';
    const GRAVE: char = '\u{0300}';
    const BREVE: char = '\u{0306}';

    fn type_virtual(engine: &mut Engine, field: &mut TextField, text: &str) {
        for ch in text.chars() {
            let key = if ch == ' ' {
                PanelKey::Space
            } else {
                PanelKey::Standard(ch)
            };
            engine.press_virtual(field, key);
        }
    }

    // =========================================================================
    // Composition
    // =========================================================================

    #[test]
    fn test_every_mapped_letter_resolves_to_primary() {
        let engine = Engine::builtin();
        for &(source, glyph) in PRIMARY_ENTRIES {
            assert_eq!(engine.resolve_with(source, false, false), glyph);
            assert_eq!(engine.resolve_with(source, true, false), glyph.to_uppercase());
        }
    }

    #[test]
    fn test_unmapped_characters_fall_back_to_input() {
        let engine = Engine::builtin();
        for ch in ['1', '!', '.', 'ß', 'ф'] {
            assert_eq!(engine.resolve_with(ch, false, false), ch.to_string());
            assert_eq!(engine.resolve_with(ch, true, false), ch.to_uppercase().to_string());
        }
        // the alternate switch does not affect unmapped input
        assert_eq!(engine.resolve_with('7', false, true), "7");
    }

    #[test]
    fn test_uppercase_input_is_lowered_first() {
        let engine = Engine::builtin();
        assert_eq!(engine.resolve_with('C', false, false), "ч");
        assert_eq!(engine.resolve_with('Ș', true, false), "Ш");
    }

    #[test]
    fn test_case_scenario() {
        let engine = Engine::builtin();
        assert_eq!(engine.resolve_with('c', true, false), "Ч");
    }

    #[test]
    fn test_alternate_scenario() {
        let engine = Engine::builtin();
        assert_eq!(engine.resolve_with('o', false, true), "о");
        assert_eq!(engine.resolve_with('o', false, false), "ѡ");
        // entries missing from the alternate table use the primary one
        assert_eq!(engine.resolve_with('b', false, true), "б");
    }

    #[test]
    fn test_alternate_with_combining_uppercases_base_only() {
        let engine = Engine::builtin();
        assert_eq!(engine.resolve_with('q', true, true), format!("Ꙋ{}", BREVE));
    }

    // =========================================================================
    // Diacritics against the buffer
    // =========================================================================

    #[test]
    fn test_apply_after_existing_letter() {
        let mut engine = Engine::builtin();
        let mut field = TextField::from_text("а");

        engine.arm_diacritic(MarkKey::Acute);
        assert!(engine.apply_diacritic(&mut field, MarkKey::Acute));
        assert_eq!(field.text(), format!("а{}", ACUTE));
        assert_eq!(field.cursor(), 2);
        // the latch is spent by a successful composition
        assert_eq!(engine.active_diacritic(), None);
    }

    #[test]
    fn test_apply_onto_non_accentable_fails() {
        let mut engine = Engine::builtin();
        let mut field = TextField::from_text("аб");

        engine.arm_diacritic(MarkKey::Acute);
        assert!(!engine.apply_diacritic(&mut field, MarkKey::Acute));
        assert_eq!(field.text(), "аб");
        assert_eq!(field.cursor(), 2);
        assert_eq!(engine.active_diacritic(), Some(MarkKey::Acute));
    }

    #[test]
    fn test_apply_with_selection_fails() {
        let mut engine = Engine::builtin();
        let mut field = TextField::from_text("аа").with_selection(0, 2);

        assert!(!engine.apply_diacritic(&mut field, MarkKey::Grave));
        assert_eq!(field.text(), "аа");
        assert_eq!(field.selection(), Selection::new(0, 2));
    }

    #[test]
    fn test_apply_on_empty_buffer_fails() {
        let mut engine = Engine::builtin();
        let mut field = TextField::new();
        assert!(!engine.apply_diacritic(&mut field, MarkKey::Acute));
        assert!(field.is_empty());
    }

    #[test]
    fn test_order_independence() {
        let mut before = Engine::builtin();
        let mut armed_first = TextField::new();
        before.press_virtual(&mut armed_first, PanelKey::Accent(MarkKey::Acute));
        before.press_virtual(&mut armed_first, PanelKey::Standard('e'));

        let mut after = Engine::builtin();
        let mut typed_first = TextField::new();
        after.press_virtual(&mut typed_first, PanelKey::Standard('e'));
        after.press_virtual(&mut typed_first, PanelKey::Accent(MarkKey::Acute));

        assert_eq!(armed_first.text(), typed_first.text());
        assert_eq!(armed_first.text(), format!("є{}", ACUTE));
        assert_eq!(before.active_diacritic(), None);
        assert_eq!(after.active_diacritic(), None);
    }

    #[test]
    fn test_second_mark_replaces_first() {
        let mut engine = Engine::builtin();
        let mut field = TextField::new();

        type_virtual(&mut engine, &mut field, "a");
        engine.press_virtual(&mut field, PanelKey::Accent(MarkKey::Acute));
        engine.press_virtual(&mut field, PanelKey::Accent(MarkKey::Grave));
        engine.press_virtual(&mut field, PanelKey::Accent(MarkKey::Grave));

        assert_eq!(field.text(), format!("а{}", GRAVE));
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_mark_lands_after_preserved_combining() {
        let mut engine = Engine::builtin();
        let mut field = TextField::new();

        engine.toggle_latch(Switch::Alternate);
        type_virtual(&mut engine, &mut field, "q");
        engine.press_virtual(&mut field, PanelKey::Accent(MarkKey::Acute));
        assert_eq!(field.text(), format!("ꙋ{}{}", BREVE, ACUTE));

        engine.press_virtual(&mut field, PanelKey::Accent(MarkKey::Grave));
        assert_eq!(field.text(), format!("ꙋ{}{}", BREVE, GRAVE));
    }

    #[test]
    fn test_compose_mid_buffer() {
        let mut engine = Engine::builtin();
        let mut field = TextField::from_text("бад");
        field.select(2, 2);

        assert!(engine.apply_diacritic(&mut field, MarkKey::Grave));
        assert_eq!(field.text(), format!("ба{}д", GRAVE));
        assert_eq!(field.cursor(), 3);
    }

    // =========================================================================
    // Buffer editing
    // =========================================================================

    #[test]
    fn test_backspace_is_scalar_level() {
        let mut engine = Engine::builtin();
        let mut field = TextField::from_text(&format!("xa{}", ACUTE));

        assert!(engine.delete_backward(&mut field));
        assert_eq!(field.text(), "xa");
        assert!(engine.delete_backward(&mut field));
        assert_eq!(field.text(), "x");
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut engine = Engine::builtin();
        let mut field = TextField::from_text("абв").with_selection(1, 3);
        engine.insert(&mut field, "ш");
        assert_eq!(field.text(), "аш");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_delete_selection_collapses_at_start() {
        let mut engine = Engine::builtin();
        let mut field = TextField::from_text("абв").with_selection(2, 0);
        assert!(engine.delete_backward(&mut field));
        assert_eq!(field.text(), "в");
        assert_eq!(field.selection(), Selection::collapsed(0));
    }

    #[test]
    fn test_free_functions_work_on_trait_objects() {
        let mut field = TextField::new();
        let dyn_buf: &mut dyn TextBuffer = &mut field;
        buffer::insert(dyn_buf, "ѡ");
        assert!(compose::apply_diacritic(
            dyn_buf,
            &GlyphTables::builtin().accentable,
            MarkKey::Acute
        ));
        assert_eq!(field.text(), format!("ѡ{}", ACUTE));
    }

    // =========================================================================
    // Physical flow
    // =========================================================================

    #[test]
    fn test_physical_word_with_suppression() {
        let mut engine = Engine::builtin();
        let mut field = TextField::new();

        for ch in "salut".chars() {
            let outcome = engine.handle_key(&mut field, &KeyEvent::char(ch));
            assert!(outcome.prevents_default());
            // the host's own insertion for this cycle must be dropped
            assert!(engine.blocks_native(NativeInput::InsertText));
            assert!(engine.blocks_native(NativeInput::InsertCompositionText));
            assert!(!engine.blocks_native(NativeInput::DeleteContentBackward));
            engine.tick();
            assert!(!engine.blocks_native(NativeInput::InsertText));
        }
        assert_eq!(field.text(), "саʌꙋт");
    }

    #[test]
    fn test_rearm_replaces_pending_reset() {
        let mut engine = Engine::builtin();
        let mut field = TextField::new();

        engine.handle_key(&mut field, &KeyEvent::char('a'));
        let first = engine.guard().pending_reset();
        engine.handle_key(&mut field, &KeyEvent::char('b'));
        let second = engine.guard().pending_reset();
        assert_ne!(first, second);

        assert!(engine.tick());
        assert!(!engine.is_suppressing());
        assert!(!engine.tick());
    }

    #[test]
    fn test_passthrough_does_not_arm() {
        let mut engine = Engine::builtin();
        let mut field = TextField::new();
        let outcome = engine.handle_key(&mut field, &KeyEvent::char('5'));
        assert_eq!(outcome, KeyOutcome::Passthrough);
        assert!(!engine.is_suppressing());
        assert!(!engine.blocks_native(NativeInput::InsertText));
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    #[test]
    fn test_custom_tables() {
        let mut primary = GlyphTable::from_entries(PRIMARY_ENTRIES);
        primary.insert('c', "ц");
        let alternate = GlyphTable::from_entries(&[('a', "ӕ")]);
        let tables = GlyphTables::new(primary, alternate, ['а', 'ӕ']);

        let mut engine = Engine::new(EngineConfig {
            tables,
            ..EngineConfig::default()
        });
        let mut field = TextField::new();

        type_virtual(&mut engine, &mut field, "c");
        engine.press_virtual(&mut field, PanelKey::Modifier(Switch::Alternate));
        engine.press_virtual(&mut field, PanelKey::Modifier(Switch::Case));
        type_virtual(&mut engine, &mut field, "a");
        engine.press_virtual(&mut field, PanelKey::Accent(MarkKey::Acute));

        assert_eq!(field.text(), format!("цӔ{}", ACUTE));
    }

    #[cfg(feature = "settings")]
    #[test]
    fn test_engine_from_settings() {
        use chirilica_core::{PhysicalKey, Settings};

        let settings = Settings::from_toml(
            r#"
[triggers.codes]
Digit5 = "grave"

[codes]
KeyQ = "ț"
"#,
        )
        .unwrap();
        let mut engine = Engine::new(settings.engine_config());
        let mut field = TextField::new();

        let trigger = KeyEvent::char('5').with_code(PhysicalKey::Digit(5));
        engine.handle_key(&mut field, &trigger);
        engine.handle_key(&mut field, &KeyEvent::char('q').with_code(PhysicalKey::Letter('q')));
        engine.handle_key(&mut field, &KeyEvent::char('a').with_code(PhysicalKey::Letter('a')));

        assert_eq!(field.text(), format!("ца{}", GRAVE));
    }
}
