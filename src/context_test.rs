use super::*;

mod new {
    use super::*;

    #[test]
    fn should_split_query_string_given_full_path() {
        // Arrange & Act
        let request = Request::get("/apps/1?lang=de&src=home%20page");

        // Assert
        assert_eq!(request.path, "/apps/1");
        assert_eq!(request.query_param("lang"), Some("de"));
        assert_eq!(request.query_param("src"), Some("home page"));
    }

    #[test]
    fn should_default_to_root_given_empty_path() {
        let request = Request::get("?lang=fr");

        assert_eq!(request.path, "/");
        assert_eq!(request.query_param("lang"), Some("fr"));
    }
}

mod param {
    use super::*;

    #[test]
    fn should_prefer_form_field_given_both_sources() {
        // Arrange
        let request = Request::post("/submit?region=us").with_form("region", "br");

        // Act & Assert
        assert_eq!(request.param("region"), Some("br"));
        assert_eq!(request.query_param("region"), Some("us"));
    }

    #[test]
    fn should_fall_back_to_query_given_no_form_field() {
        let request = Request::post("/submit?lang=de");

        assert_eq!(request.param("lang"), Some("de"));
    }
}

mod is_ajax {
    use super::*;

    #[test]
    fn should_detect_header_case_insensitively() {
        let request = Request::get("/").with_header("x-requested-with", "xmlhttprequest");

        assert!(request.is_ajax());
        assert!(!Request::get("/").is_ajax());
    }
}

mod full_path {
    use super::*;

    #[test]
    fn should_reencode_query_given_parameters() {
        let request = Request::get("/search?q=a b&lang=de");

        assert_eq!(request.full_path(), "/search?q=a+b&lang=de");
    }
}

mod request_context {
    use super::*;

    #[test]
    fn should_seed_cookie_jar_from_request_cookies() {
        // Arrange
        let request = Request::get("/").with_cookie("region", "br");

        // Act
        let ctx = RequestContext::new(request);

        // Assert
        assert_eq!(ctx.cookies.get("region"), Some("br"));
        assert!(ctx.cookies.pending().is_empty());
        assert!(ctx.region.is_none());
        assert!(!ctx.devices.get("mobile"));
    }
}
