#[cfg(test)]
mod tests {
    use super::super::*;
    use curie_common::{CurieError, Modifier, ModifierSet, Phenotype};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert_eq!(config.data.dir, PathBuf::from("./data"));
        assert_eq!(config.phenotype.max_drivers, 3);
        assert!(config.phenotype.rules.is_none());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.server.bind, default_bind());
        assert_eq!(config.phenotype.max_drivers, default_max_drivers());
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let config = Config::from_toml_str(include_str!("../../../../curie.example.toml")).unwrap();
        assert_eq!(config.server.bind, default_bind());
        assert_eq!(config.data.dir, default_data_dir());
        assert_eq!(config.classifier().unwrap().rules(), &RuleTable::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [server]
            bind = "127.0.0.1:9000"

            [data]
            dir = "/srv/curie"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.data.dir, PathBuf::from("/srv/curie"));
        assert_eq!(config.phenotype.max_drivers, 3);
    }

    #[test]
    fn test_rule_override_drives_classifier() {
        let config = Config::from_toml_str(
            r#"
            [phenotype]
            max_drivers = 2

            [[phenotype.rules]]
            modifier = "afib"
            phenotype = "afib_predominant"
            points = 3

            [[phenotype.rules]]
            modifier = "hypotension"
            phenotype = "afib_predominant"
            points = 1
            "#,
        )
        .unwrap();
        let classifier = config.classifier().unwrap();
        assert_eq!(classifier.max_drivers(), 2);
        assert_eq!(classifier.rules().len(), 2);

        let set = ModifierSet::new().with(Modifier::Afib).with(Modifier::Hypotension).with(Modifier::Ckd);
        let result = classifier.classify(&set);
        assert_eq!(result.primary_phenotype, Some(Phenotype::AfibPredominant));
        assert_eq!(result.drivers, vec![Modifier::Afib, Modifier::Hypotension]);
    }

    #[test]
    fn test_zero_point_rule_rejected() {
        let config = Config::from_toml_str(
            r#"
            [[phenotype.rules]]
            modifier = "ckd"
            phenotype = "ckd_modified"
            points = 0
            "#,
        )
        .unwrap();
        assert!(matches!(config.classifier(), Err(CurieError::Config(_))));
    }

    #[test]
    fn test_unknown_phenotype_is_parse_error() {
        let err = Config::from_toml_str(
            r#"
            [[phenotype.rules]]
            modifier = "ckd"
            phenotype = "renal"
            points = 2
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CurieError::Toml(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curie.toml");
        std::fs::write(&path, "[server]\nbind = \"0.0.0.0:7000\"\n").unwrap();
        assert_eq!(Config::from_path(&path).unwrap().server.bind, "0.0.0.0:7000");
        assert!(matches!(Config::from_path(&dir.path().join("missing.toml")), Err(CurieError::Io(_))));
    }

    #[test]
    fn test_bind_resolution_order() {
        assert_eq!(resolve_bind(None, None, "0.0.0.0:8000"), "0.0.0.0:8000");
        assert_eq!(resolve_bind(None, Some("5000".into()), "0.0.0.0:8000"), "0.0.0.0:5000");
        assert_eq!(resolve_bind(None, Some("not-a-port".into()), "0.0.0.0:8000"), "0.0.0.0:8000");
        assert_eq!(
            resolve_bind(Some("127.0.0.1:3001".into()), Some("5000".into()), "0.0.0.0:8000"),
            "127.0.0.1:3001"
        );
        assert_eq!(resolve_bind(Some(String::new()), None, "0.0.0.0:8000"), "0.0.0.0:8000");
    }
}
