use std::{str::FromStr, sync::Arc, thread};

use wan22_prompt_core::{
    assembler::{find_description, ACTION_LOOKUPS, EMOTION_LOOKUPS},
    locale::Locale,
    preset::resolve_strict,
    utils::log::dispatch,
    ParameterKind, PresetStore, PresetTable, PromptAssembler, PromptRequest, StoreConfig,
    SubjectType,
};

fn builtin(locale: Locale) -> anyhow::Result<PromptAssembler> {
    let table = PresetStore::load(&StoreConfig::new(locale)).map_err(|f| f.error)?;
    Ok(PromptAssembler::new(Arc::new(table), locale)?)
}

/// 每个可选项都能解析到存在的预设
fn assert_options_resolve(table: &PresetTable, locale: Locale) {
    let sentinels = locale.strings().sentinels;

    for option in table.options(ParameterKind::SubjectType) {
        assert!(SubjectType::from_str(option).is_ok(), "subject type {option}");
    }

    for (kind, presets) in [
        (ParameterKind::CharacterCamera, &table.character_camera),
        (ParameterKind::ObjectCamera, &table.object_camera),
    ] {
        assert!(!table.options(kind).is_empty());
        for option in table.options(kind) {
            let (key, _) = resolve_strict(option, presets)
                .unwrap_or_else(|| panic!("{kind} option '{option}' does not resolve"));
            assert!(
                presets.get(key).and_then(|p| p.template.as_ref()).is_some(),
                "{kind} option '{option}' has no template"
            );
        }
    }

    for option in table.options(ParameterKind::Lighting) {
        assert!(
            option == sentinels.lighting || table.lighting.effects.contains_key(option),
            "lighting option '{option}'"
        );
    }

    for option in table.options(ParameterKind::CharacterAction) {
        assert!(
            option == sentinels.action
                || find_description(ACTION_LOOKUPS, table, option).is_some(),
            "action option '{option}'"
        );
    }

    for option in table.options(ParameterKind::EmotionalExpression) {
        assert!(
            option == sentinels.emotion
                || find_description(EMOTION_LOOKUPS, table, option).is_some(),
            "emotion option '{option}'"
        );
    }
}

#[test]
fn test_builtin_options_round_trip() -> anyhow::Result<()> {
    for locale in [Locale::En, Locale::Zh] {
        let assembler = builtin(locale)?;
        assert_options_resolve(assembler.table(), locale);
    }
    Ok(())
}

#[test]
fn test_base_document_options_round_trip() -> anyhow::Result<()> {
    for locale in [Locale::En, Locale::Zh] {
        let strings = locale.strings();
        let table =
            PresetStore::from_documents("base", strings.builtin_templates, None, locale)?;
        assert_options_resolve(&table, locale);
    }
    Ok(())
}

#[test]
fn test_minimal_table_options_round_trip() {
    for locale in [Locale::En, Locale::Zh] {
        assert_options_resolve(&PresetTable::minimal(locale), locale);
    }
}

#[test]
fn test_object_orbit_strips_subject_sentence() -> anyhow::Result<()> {
    let assembler = builtin(Locale::En)?;
    let clause = assembler.camera_clause(SubjectType::Object, "1 - Slow Orbit", "robot")?;
    assert_eq!(clause, "The camera slowly orbits robot.");

    let request = PromptRequest::new("Object", "robot")
        .with_object_camera("1 - Slow Orbit")
        .with_character_camera("3 - Orbit Around")
        .with_lighting("No Lighting Effect")
        .with_action("No Specific Action")
        .with_emotion("No Specific Emotion");
    assert_eq!(
        assembler.assemble(&request)?,
        "Robot is located in the center of the frame, with a complete and clear structure, \
         and a stable base touching the ground. The camera slowly orbits robot."
    );
    Ok(())
}

#[test]
fn test_character_prompt_order() -> anyhow::Result<()> {
    let assembler = builtin(Locale::En)?;
    let request = PromptRequest::new("Character", "knight")
        .with_character_camera("11 - Turn To Camera")
        .with_object_camera("1 - Slow Orbit")
        .with_lighting("Rim Light")
        .with_action("1 - Walking Forward")
        .with_emotion("7 - Determined");

    let expected = [
        "Knight stands in the center of the frame, with a clear full-body silhouette and natural posture.",
        "The gaze is steady and focused, lips pressed together with determination.",
        "Knight walks forward with relaxed, steady steps.",
        "Knight turns toward the camera as the camera holds a steady medium close-up.",
        "A bright rim light outlines knight's silhouette against a dark background.",
    ]
    .join(" ");
    assert_eq!(assembler.assemble(&request)?, expected);
    Ok(())
}

#[test]
fn test_legacy_labels_still_resolve() -> anyhow::Result<()> {
    let assembler = builtin(Locale::En)?;
    let by_label = PromptRequest::new("Character", "knight")
        .with_character_camera("2 - Slow Pull Back")
        .with_action("3 - Waving")
        .with_emotion("1 - Joyful");
    let by_id = PromptRequest::new("Character", "knight")
        .with_character_camera("2")
        .with_action("3")
        .with_emotion("1");
    let by_name = PromptRequest::new("Character", "knight")
        .with_character_camera("Slow Pull Back")
        .with_action("Waving")
        .with_emotion("Joyful");

    let expected = assembler.assemble(&by_label)?;
    assert_eq!(assembler.assemble(&by_id)?, expected);
    assert_eq!(assembler.assemble(&by_name)?, expected);
    Ok(())
}

#[test]
fn test_unknown_camera_falls_back_to_first_preset() -> anyhow::Result<()> {
    let assembler = builtin(Locale::En)?;
    let unknown = PromptRequest::new("Object", "vase").with_object_camera("99 - Removed");
    let first = PromptRequest::new("Object", "vase").with_object_camera("1 - Slow Orbit");
    assert_eq!(assembler.assemble(&unknown)?, assembler.assemble(&first)?);
    Ok(())
}

#[test]
fn test_sentinels_contribute_nothing() -> anyhow::Result<()> {
    for locale in [Locale::En, Locale::Zh] {
        let assembler = builtin(locale)?;
        let sentinels = locale.strings().sentinels;
        let subject_type = locale.strings().subject_type_labels[0];
        let camera = &assembler.table().options(ParameterKind::CharacterCamera)[0];

        let bare = PromptRequest::new(subject_type, "dancer").with_character_camera(camera);
        let with_sentinels = bare
            .clone()
            .with_lighting(sentinels.lighting)
            .with_action(sentinels.action)
            .with_emotion(sentinels.emotion);
        let with_none = bare
            .clone()
            .with_lighting("none")
            .with_action("none")
            .with_emotion("none");

        let expected = assembler.assemble(&bare)?;
        assert_eq!(assembler.assemble(&with_sentinels)?, expected);
        assert_eq!(assembler.assemble(&with_none)?, expected);
    }
    Ok(())
}

#[test]
fn test_empty_subject_is_an_error_result() -> anyhow::Result<()> {
    let assembler = builtin(Locale::En)?;
    for subject in ["", "   ", "\t\n"] {
        let request = PromptRequest::new("Character", subject)
            .with_character_camera("1 - Slow Push In")
            .with_lighting("Golden Hour");
        let output = assembler.render(&request);
        assert!(output.starts_with("Error: "), "{output}");
        assert!(output.to_lowercase().contains("subject"), "{output}");
    }

    let assembler = builtin(Locale::Zh)?;
    let output = assembler.render(&PromptRequest::new("角色", ""));
    assert!(output.starts_with("错误: "), "{output}");
    Ok(())
}

#[test]
fn test_chinese_prompt() -> anyhow::Result<()> {
    let assembler = builtin(Locale::Zh)?;
    let request = PromptRequest::new("物体", "机器人")
        .with_object_camera("1 - 缓慢环绕")
        .with_lighting("月光")
        .with_action("无特定动作")
        .with_emotion("无特定情绪");

    assert_eq!(
        assembler.assemble(&request)?,
        "机器人位于画面中央，结构完整清晰，底座稳定接触地面。 镜头缓慢环绕机器人。 清冷的蓝色月光从上方照亮机器人。"
    );
    Ok(())
}

#[test]
fn test_assembly_is_idempotent() -> anyhow::Result<()> {
    let assembler = builtin(Locale::En)?;
    let request = PromptRequest::new("Character", "astronaut")
        .with_character_camera("6 - Over The Shoulder")
        .with_lighting("Neon Glow")
        .with_action("8 - Looking Up")
        .with_emotion("4 - Surprised");

    let first = assembler.render(&request);
    let second = assembler.render(&request);
    assert_eq!(first, second);
    assert!(!first.starts_with("Error: "));
    Ok(())
}

#[test]
fn test_injected_dispatch_and_shared_use() -> anyhow::Result<()> {
    let plain = Arc::new(builtin(Locale::En)?);
    let logged = Arc::new(builtin(Locale::En)?.with_dispatch(dispatch(tracing::Level::DEBUG)));
    let request = PromptRequest::new("Object", "teapot")
        .with_object_camera("9 - Turntable")
        .with_lighting("Soft Studio Light");

    let expected = plain.assemble(&request)?;
    let outputs = thread::scope(|scope| {
        let handles = (0..4)
            .map(|i| {
                let assembler = if i % 2 == 0 { &plain } else { &logged };
                let request = &request;
                scope.spawn(move || assembler.render(request))
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_default())
            .collect::<Vec<_>>()
    });

    for output in outputs {
        assert_eq!(output, expected);
    }
    Ok(())
}
