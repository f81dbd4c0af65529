#[cfg(feature = "tracing")]
macro_rules! fxtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "stylefx", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! fxtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! fxdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "stylefx", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! fxdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! fxwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "stylefx", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! fxwarn {
    ($($tt:tt)*) => {};
}
