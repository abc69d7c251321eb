//! `SharedPtr<T>` is a minimal reference-counted smart pointer in the style of C++'s
//! `shared_ptr`. It provides shared ownership of a single heap-allocated object:
//! every clone owns the same object, and the object is freed exactly once, when the
//! last owning handle is dropped.
//!
//! Unlike `Rc<T>`, a `SharedPtr<T>` may be empty (owning nothing), and it can adopt
//! ownership of a raw pointer produced by `Box::into_raw`. The reference counter is
//! a separate heap cell shared by all owning handles; it is not atomic, so the
//! pointer is for single-threaded or externally-synchronized use only.
//!
//! There are no weak references: a cycle between `SharedPtr` handles will never be
//! deallocated. Keep ownership graphs acyclic, or hold one edge as a raw pointer.

pub mod shared_ptr;
pub use crate::shared_ptr::SharedPtr;

#[cfg(test)]
mod tests;
