// tests that Clone, Debug, Display, and PartialEq are implemented for a
// distribution
#[macro_export]
macro_rules! test_basic_impls {
    ($fx: expr) => {
        #[test]
        fn should_impl_debug_clone_display_and_partialeq() {
            let fx = $fx;
            assert_eq!(fx, fx.clone());
            let _s1 = format!("{:?}", fx);
            let s2 = format!("{}", fx);
            assert_eq!(s2, String::from(&fx));
        }
    };
}
