//! The `|` compose operator.
//!
//! `sender | adaptor` is exactly `adaptor.apply(sender)`. Builders such as
//! [`then`](crate::then) and [`sync_await`](crate::sync_await) return adaptors,
//! which allows pipelines to be written left to right:
//!
//! ```rust
//! use exe::*;
//!
//! let poem = just_value("lorem".to_string()) | then(|s: String| s + " ipsum") | sync_await();
//! assert_eq!(poem, "lorem ipsum");
//! ```

/// Something that can be applied to a sender on the right of `|`.
pub trait Adaptor<S> {
    type Output;

    fn apply(self, sender: S) -> Self::Output;
}

/// Implements `BitOr<A>` for a sender type by deferring to `A: Adaptor<Self>`.
macro_rules! impl_pipe {
    (impl<$($param:ident),*> for $sender:ty) => {
        impl<$($param,)* A> std::ops::BitOr<A> for $sender
        where
            A: $crate::Adaptor<$sender>,
        {
            type Output = A::Output;

            fn bitor(self, adaptor: A) -> A::Output {
                adaptor.apply(self)
            }
        }
    };
}

pub(crate) use impl_pipe;
