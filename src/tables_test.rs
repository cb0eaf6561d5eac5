use super::*;

fn languages() -> LanguageTable {
    LanguageTable::new(["en-US", "de", "fr", "pt-BR", "es"])
}

mod language_table {
    use super::*;

    #[test]
    fn should_return_canonical_code_when_lookup_differs_in_case() {
        let table = languages();

        assert_eq!(table.canonical("PT-br"), Some("pt-BR"));
        assert_eq!(table.canonical("EN-us"), Some("en-US"));
    }

    #[test]
    fn should_reject_unknown_code_when_not_registered() {
        let table = languages();

        assert_eq!(table.canonical("xx"), None);
        assert!(!table.contains("pt"));
    }

    #[test]
    fn should_fall_back_to_primary_subtag_when_tag_has_unknown_territory() {
        let table = languages();

        assert_eq!(table.lookup_tag("de-AT"), Some("de"));
        assert_eq!(table.lookup_tag("pt"), Some("pt-BR"));
        assert_eq!(table.lookup_tag("en-GB"), Some("en-US"));
        assert_eq!(table.lookup_tag("ja"), None);
    }

    #[test]
    fn should_skip_blank_codes_when_constructed() {
        let table = LanguageTable::new(["", " ", "de"]);

        assert_eq!(table.len(), 1);
    }
}

mod region_table {
    use super::*;

    #[test]
    fn should_order_worldwide_first_then_by_ordering_when_built() {
        // Arrange
        let others = [
            Region::new("us", "us", "en-US", 2),
            Region::new("br", "br", "pt-BR", 1),
            Region::new("de", "de", "de", 2),
        ];

        // Act
        let table = RegionTable::new(Region::worldwide("en-US"), others).expect("valid regions");

        // Assert
        let slugs: Vec<_> = table.iter().map(|region| region.slug.as_str()).collect();
        assert_eq!(slugs, ["worldwide", "br", "de", "us"]);
        assert_eq!(table.worldwide().slug, "worldwide");
        assert_eq!(table.specific().count(), 3);
    }

    #[test]
    fn should_lowercase_slugs_when_built() {
        let table = RegionTable::new(
            Region::worldwide("en-US"),
            [Region::new("BR", "br", "pt-BR", 0)],
        )
        .expect("valid regions");

        assert!(table.contains("br"));
        assert!(!table.contains("BR"));
    }

    #[test]
    fn should_reject_duplicate_slug_when_built() {
        let result = RegionTable::new(
            Region::worldwide("en-US"),
            [
                Region::new("br", "br", "pt-BR", 0),
                Region::new("Br", "brazil", "pt-BR", 1),
            ],
        );

        assert!(matches!(result, Err(ValidationError::DuplicateRegion(slug)) if slug == "br"));
    }

    #[test]
    fn should_reject_worldwide_duplicate_when_listed_again() {
        let result = RegionTable::new(
            Region::worldwide("en-US"),
            [Region::worldwide("en-US")],
        );

        assert!(matches!(result, Err(ValidationError::DuplicateRegion(_))));
    }

    #[test]
    fn should_reject_empty_slug_when_built() {
        let result = RegionTable::new(
            Region::worldwide("en-US"),
            [Region::new(" ", "x", "en-US", 0)],
        );

        assert!(matches!(result, Err(ValidationError::EmptyRegionSlug)));
    }
}
