//! Unit tests for auxiliary identifier naming

#[cfg(test)]
mod aux_naming_tests {
    use polyschema::utils::aux_naming::{
        lower_case_first, NameTruncator, DEFAULT_IDENTIFIER_MAX_LENGTH,
        DELEGATE_AUX_RELATION_PREFIX,
    };
    use test_case::test_case;

    #[test]
    fn test_default_budget_excludes_prefix() {
        let names = NameTruncator::default();
        assert_eq!(
            names.max_len(),
            DEFAULT_IDENTIFIER_MAX_LENGTH - DELEGATE_AUX_RELATION_PREFIX.len()
        );
        assert_eq!(names.max_len(), 38);
    }

    #[test_case("Dog", "dog" ; "capitalized")]
    #[test_case("dog", "dog" ; "already lower")]
    #[test_case("ÉcoleRecord", "écoleRecord" ; "non ascii")]
    fn test_lower_case_first(input: &str, expected: &str) {
        assert_eq!(lower_case_first(input), expected);
    }

    #[test]
    fn test_names_within_budget_are_untouched() {
        let mut names = NameTruncator::new(30);
        let exact = "a".repeat(18);
        assert_eq!(names.truncate(&exact), exact);
        assert_eq!(names.aux_name("User_posts_Post"), "delegate_aux_User_posts_Post");
    }

    #[test]
    fn test_collisions_are_numbered_in_first_seen_order() {
        let mut names = NameTruncator::new(30);
        let first = "OrderLineItemRecord_invoice_Pdf";
        let second = "OrderLineItemRecord_invoice_Html";

        assert_eq!(names.truncate(second), "OrderLineItemRecor_0");
        assert_eq!(names.truncate(first), "OrderLineItemRecor_1");
        // repeated names reuse their index
        assert_eq!(names.truncate(second), "OrderLineItemRecor_0");
        assert_eq!(names.aux_name(first), "delegate_aux_OrderLineItemRecor_1");
    }

    #[test]
    fn test_separate_truncators_do_not_share_state() {
        let long = "x".repeat(60);
        let other = format!("{}y", "x".repeat(59));

        let mut a = NameTruncator::default();
        assert_eq!(a.truncate(&long), format!("{}_0", "x".repeat(38)));
        assert_eq!(a.truncate(&other), format!("{}_1", "x".repeat(38)));

        let mut b = NameTruncator::default();
        assert_eq!(b.truncate(&other), format!("{}_0", "x".repeat(38)));
    }

    #[test]
    fn test_truncation_counts_characters() {
        let mut names = NameTruncator::new(20);
        let name = "ééééééééééé";
        assert_eq!(names.truncate(name), "éééééééé_0");
    }
}
