use std::error::Error;

/// An error type that indicates a programming mistake rather than a runtime condition, so it is
/// raised by panicking with its own message instead of being returned.
pub trait Panic: Error {
    fn panic(&self) -> ! {
        panic!("{}", self)
    }
}

#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        $crate::util::panic::assert_panics!($run, "assertion failed to panic")
    };
    ($run:block, $msg:literal) => {
        assert!(
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)).is_err(),
            $msg
        );
        println!("^ panic caught");
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
