/// Build a value from its [Default], assigning the listed fields. Mostly for configs in tests:
/// `new_t!(SimConfig, population_size = 3, elite_count = 1)`
#[macro_export]
macro_rules! new_t {
    ($t:ty, $($k:ident = $v:expr),+ $(,)?) => {{
        let mut c = <$t>::default();
        $(c.$k = $v;)+
        c
    }};
}

/// Stamp out one test per listed type, with the type aliased to `T` in the body
#[macro_export]
macro_rules! test_t {
    ($name:ident[T: $($impl:ty)|*]() $body:tt ) => {$(
        ::paste::paste! {
            #[test]
            fn [<test_ $name _ $impl:snake>]() {
                type T = $impl;
                $body
            }
        }
    )+};
}

#[macro_export]
macro_rules! assert_f64_approx {
    ($l:expr, $r:expr) => {
        $crate::assert_f64_approx!($l, $r, f64::EPSILON)
    };
    ($l:expr, $r:expr, $tol:expr) => {{
        let (l, r): (f64, f64) = ($l, $r);
        assert!((l - r).abs() < $tol, "assertion failed: {} !~ {} (± {})", l, r, $tol)
    }};
}
