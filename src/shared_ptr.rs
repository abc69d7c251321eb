use std::{
    cmp::Ordering,
    fmt::{Debug, Pointer},
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
    ops::Deref,
    ptr,
};

const MAX_REFCOUNT: usize = (isize::MAX) as usize;

/// `SharedPtr<T>` is a minimal reference-counted smart pointer in the style of C++'s
/// `shared_ptr`. It provides shared ownership of a single heap-allocated object:
/// every clone of a `SharedPtr<T>` owns the same object, and the object is freed
/// when the last owning handle is dropped.
///
/// Unlike [`Rc<T>`](std::rc::Rc), a `SharedPtr<T>` may be *empty* (holding no
/// object at all), and it can adopt ownership of a raw pointer produced by
/// [`Box::into_raw`]. The object and its reference counter are two separate heap
/// cells; an empty handle owns neither.
///
/// ## Counter behavior
/// Adopting a non-null pointer allocates a counter cell initialized to 1. Cloning
/// increments it, dropping decrements it, and the drop that moves the count from
/// 1 to 0 frees the counter cell and the managed object together. An empty handle
/// has no counter cell, so `ptr` and `count` are always both null or both set.
///
/// ## Move behavior
/// Moving a `SharedPtr<T>` (by value, or with `mem::take`/`mem::replace`)
/// transfers ownership without touching the counter. The moved-from handle is
/// statically dead, so its destructor never runs and the count stays balanced.
///
/// ## Thread safety
/// `SharedPtr<T>` is neither [`Send`] nor [`Sync`]: the counter is a plain
/// (non-atomic) cell, and the usage model is single-threaded or externally
/// synchronized. Use [`Arc<T>`](std::sync::Arc) for cross-thread sharing.
///
/// To prevent name clashes with the managed value's own methods (reachable
/// through [`Deref`]), `SharedPtr<T>`'s functions are associated.
///
/// ## Examples
///
/// Sharing one object between handles:
/// ```
/// use sharedptr::SharedPtr;
///
/// let a = SharedPtr::new(100);
/// let b = a.clone();
/// assert_eq!(*a, 100);
/// assert!(SharedPtr::ptr_eq(&a, &b));
/// assert_eq!(SharedPtr::strong_count(&a), 2);
/// ```
///
/// Adopting a raw pointer:
/// ```
/// use sharedptr::SharedPtr;
///
/// let raw = Box::into_raw(Box::new(String::from("adopted")));
/// let sp = unsafe { SharedPtr::from_raw(raw) };
/// assert_eq!(&*sp, "adopted");
/// ```
pub struct SharedPtr<T> {
    ptr: *mut T,
    count: *mut usize,
}

impl<T> SharedPtr<T> {
    /// Creates a new `SharedPtr<T>` owning the provided value. The value is moved
    /// to the heap and the reference count starts at 1.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let sp = SharedPtr::new(100);
    /// assert_eq!(*sp, 100);
    /// assert_eq!(SharedPtr::strong_count(&sp), 1);
    /// ```
    #[inline]
    pub fn new(value: T) -> Self {
        unsafe { SharedPtr::from_raw(Box::into_raw(Box::new(value))) }
    }

    /// Creates an empty `SharedPtr<T>`: no object, no counter, no allocation.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let sp = SharedPtr::<i32>::null();
    /// assert!(SharedPtr::is_null(&sp));
    /// assert_eq!(SharedPtr::strong_count(&sp), 0);
    /// ```
    #[inline]
    pub const fn null() -> Self {
        SharedPtr {
            ptr: ptr::null_mut(),
            count: ptr::null_mut(),
        }
    }

    /// Constructs a `SharedPtr<T>` that adopts ownership of `ptr`. A non-null
    /// pointer gets a fresh counter cell initialized to 1; a null pointer yields
    /// the empty handle.
    ///
    /// # Safety
    /// `ptr` must be null, or a pointer obtained from [`Box::into_raw`] that is
    /// adopted by at most one `SharedPtr` lineage. Adopting the same pointer into
    /// two independent handles produces two disjoint counters for one object and
    /// ends in a double free. The caller must also never free an adopted pointer
    /// manually.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let raw = Box::into_raw(Box::new(100));
    /// let sp = unsafe { SharedPtr::from_raw(raw) };
    /// assert_eq!(*sp, 100);
    /// ```
    #[inline]
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        if ptr.is_null() {
            return SharedPtr::null();
        }
        SharedPtr {
            ptr,
            count: Box::into_raw(Box::new(1)),
        }
    }

    /// Returns a reference to the managed object, or [`None`] for an empty handle.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let sp = SharedPtr::new(100);
    /// assert_eq!(SharedPtr::get(&sp), Some(&100));
    /// assert_eq!(SharedPtr::get(&SharedPtr::<i32>::null()), None);
    /// ```
    #[inline]
    pub fn get(this: &Self) -> Option<&T> {
        unsafe { this.ptr.as_ref() }
    }

    /// Returns a mutable reference to the managed object if this handle is the
    /// unique owner (count exactly 1). Returns [`None`] for an empty handle or
    /// when the object is shared, because mutating a shared value through one
    /// handle would be visible through all of them.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let mut sp = SharedPtr::new(100);
    /// *SharedPtr::get_mut(&mut sp).unwrap() = 200;
    /// assert_eq!(*sp, 200);
    ///
    /// let other = sp.clone();
    /// assert!(SharedPtr::get_mut(&mut sp).is_none());
    /// drop(other);
    /// assert!(SharedPtr::get_mut(&mut sp).is_some());
    /// ```
    #[inline]
    pub fn get_mut(this: &mut Self) -> Option<&mut T> {
        if this.ptr.is_null() || unsafe { *this.count } != 1 {
            return None;
        }
        unsafe { this.ptr.as_mut() }
    }

    /// Returns the raw address of the managed object without affecting ownership.
    /// The result is null for an empty handle and stays valid only while some
    /// handle owns the object.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let sp = SharedPtr::new(100);
    /// assert!(!SharedPtr::as_ptr(&sp).is_null());
    /// assert!(SharedPtr::as_ptr(&SharedPtr::<i32>::null()).is_null());
    /// ```
    #[inline]
    pub fn as_ptr(this: &Self) -> *mut T {
        this.ptr
    }

    /// Reports whether this handle is empty.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// assert!(SharedPtr::<i32>::is_null(&SharedPtr::null()));
    /// assert!(!SharedPtr::is_null(&SharedPtr::new(100)));
    /// ```
    #[inline]
    pub fn is_null(this: &Self) -> bool {
        this.ptr.is_null()
    }

    /// Returns the number of `SharedPtr<T>` handles currently owning the managed
    /// object, or 0 for an empty handle.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let sp = SharedPtr::new(100);
    /// let sp2 = sp.clone();
    /// assert_eq!(SharedPtr::strong_count(&sp), 2);
    /// drop(sp2);
    /// assert_eq!(SharedPtr::strong_count(&sp), 1);
    /// ```
    #[inline]
    pub fn strong_count(this: &Self) -> usize {
        if this.ptr.is_null() {
            0
        } else {
            unsafe { *this.count }
        }
    }

    /// Checks whether two handles manage the same object. Two empty handles
    /// compare equal.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let a = SharedPtr::new(100);
    /// let b = a.clone();
    /// let c = SharedPtr::new(100);
    /// assert!(SharedPtr::ptr_eq(&a, &b));
    /// assert!(!SharedPtr::ptr_eq(&a, &c));
    /// ```
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.ptr == other.ptr
    }

    /// Replaces the current ownership with ownership of `ptr`. Releases the
    /// previously managed object (freeing it if this was the last owner) and
    /// adopts `ptr` fresh at count 1, or becomes empty if `ptr` is null.
    ///
    /// Resetting to the pointer the handle already holds is a no-op: the handle
    /// must not re-adopt an address it already owns, so the count is unchanged
    /// and nothing is freed.
    ///
    /// # Safety
    /// Same contract as [`SharedPtr::from_raw`].
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let mut sp = SharedPtr::new(100);
    /// unsafe { SharedPtr::reset(&mut sp, Box::into_raw(Box::new(200))) };
    /// assert_eq!(*sp, 200);
    /// assert_eq!(SharedPtr::strong_count(&sp), 1);
    /// ```
    #[inline]
    pub unsafe fn reset(this: &mut Self, ptr: *mut T) {
        if ptr == this.ptr {
            return;
        }
        drop(std::mem::replace(this, SharedPtr::from_raw(ptr)));
    }

    /// Releases the current ownership and leaves the handle empty.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let mut sp = SharedPtr::new(100);
    /// SharedPtr::clear(&mut sp);
    /// assert!(SharedPtr::is_null(&sp));
    /// ```
    #[inline]
    pub fn clear(this: &mut Self) {
        drop(std::mem::replace(this, SharedPtr::null()));
    }

    /// Exchanges the managed objects (and counters) of two handles. No reference
    /// count changes, no allocation.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let mut a = SharedPtr::new(1);
    /// let mut b = SharedPtr::new(2);
    /// SharedPtr::swap(&mut a, &mut b);
    /// assert_eq!(*a, 2);
    /// assert_eq!(*b, 1);
    /// ```
    #[inline]
    pub fn swap(this: &mut Self, other: &mut Self) {
        std::mem::swap(this, other);
    }

    /// Returns the managed value if this handle is the unique owner. Otherwise,
    /// an [`Err`] is returned with the same `SharedPtr` that was passed in; an
    /// empty handle is always an [`Err`].
    ///
    /// On success only the counter cell is freed; the value itself is moved out
    /// rather than dropped.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let sp = SharedPtr::new(100);
    /// assert_eq!(SharedPtr::try_unwrap(sp), Ok(100));
    ///
    /// let sp = SharedPtr::new(100);
    /// let sp2 = sp.clone();
    /// assert!(SharedPtr::try_unwrap(sp).is_err());
    /// ```
    #[inline]
    pub fn try_unwrap(this: Self) -> Result<T, Self> {
        if this.ptr.is_null() || unsafe { *this.count } != 1 {
            return Err(this);
        }

        let this = ManuallyDrop::new(this);
        unsafe {
            drop(Box::from_raw(this.count));
            Ok(*Box::from_raw(this.ptr))
        }
    }
}

impl<T> Drop for SharedPtr<T> {
    /// Releases this handle's ownership. If the handle is empty, nothing happens.
    /// If this was the last owner, the counter cell and then the managed object
    /// are freed; otherwise the count is decremented and the object stays alive
    /// for the remaining owners.
    #[inline]
    fn drop(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        unsafe {
            if *self.count == 1 {
                drop(Box::from_raw(self.count));
                drop(Box::from_raw(self.ptr));
            } else {
                *self.count -= 1;
            }
        }
    }
}

impl<T> Clone for SharedPtr<T> {
    /// Clone a `SharedPtr<T>` (increment the shared reference count). The new
    /// handle owns the same object; cloning an empty handle yields another empty
    /// handle. It will panic if the reference count overflows.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let sp = SharedPtr::new(100);
    /// let sp2 = sp.clone();
    /// assert_eq!(SharedPtr::strong_count(&sp), SharedPtr::strong_count(&sp2));
    /// ```
    #[inline]
    fn clone(&self) -> Self {
        if !self.ptr.is_null() {
            unsafe {
                *self.count += 1;
                if *self.count > MAX_REFCOUNT {
                    panic!("Overflow of maximum reference count.");
                }
            }
        }

        SharedPtr {
            ptr: self.ptr,
            count: self.count,
        }
    }

    /// Copy-assignment: replace this handle's ownership with a share of
    /// `source`'s. When both handles already manage the same object (or both are
    /// empty) this is a no-op and the count is unchanged.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let a = SharedPtr::new(100);
    /// let mut b = SharedPtr::new(200);
    /// b.clone_from(&a);
    /// assert!(SharedPtr::ptr_eq(&a, &b));
    /// assert_eq!(SharedPtr::strong_count(&a), 2);
    /// ```
    #[inline]
    fn clone_from(&mut self, source: &Self) {
        if self.ptr == source.ptr {
            return;
        }
        drop(std::mem::replace(self, source.clone()));
    }
}

impl<T> Deref for SharedPtr<T> {
    type Target = T;

    /// Get an immutable reference to the managed object.
    ///
    /// # Panics
    /// Panics if the handle is empty. Use [`SharedPtr::get`] for the
    /// non-panicking form.
    /// ```
    /// use sharedptr::SharedPtr;
    /// use std::ops::Deref;
    ///
    /// let sp = SharedPtr::new(100i32);
    /// assert_eq!(*sp, 100i32);
    /// assert_eq!(sp.deref(), &100i32);
    /// ```
    /// ```should_panic
    /// use sharedptr::SharedPtr;
    ///
    /// let sp = SharedPtr::<i32>::null();
    /// let _ = *sp;
    /// ```
    #[inline]
    fn deref(&self) -> &Self::Target {
        match SharedPtr::get(self) {
            Some(value) => value,
            None => panic!("Dereferenced an empty SharedPtr."),
        }
    }
}

impl<T> Default for SharedPtr<T> {
    /// The default `SharedPtr<T>` is the empty handle.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let sp = SharedPtr::<i32>::default();
    /// assert!(SharedPtr::is_null(&sp));
    /// ```
    #[inline]
    fn default() -> Self {
        SharedPtr::null()
    }
}

impl<T> From<T> for SharedPtr<T> {
    /// Create a new `SharedPtr<T>` from the provided value. This is equivalent to
    /// calling `SharedPtr::new` on the same value.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let sp = SharedPtr::from(100);
    /// assert_eq!(*sp, 100);
    /// ```
    fn from(value: T) -> Self {
        SharedPtr::new(value)
    }
}

impl<T> From<Box<T>> for SharedPtr<T> {
    /// Adopt a boxed value. This is the safe adoption path: the box is consumed,
    /// so no second lineage for the pointer can exist.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let sp: SharedPtr<i32> = SharedPtr::from(Box::new(100));
    /// assert_eq!(*sp, 100);
    /// ```
    fn from(boxed: Box<T>) -> Self {
        unsafe { SharedPtr::from_raw(Box::into_raw(boxed)) }
    }
}

impl<T: Debug> Debug for SharedPtr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match SharedPtr::get(self) {
            Some(value) => write!(f, "SharedPtr({:?})", value),
            None => f.write_str("SharedPtr(null)"),
        }
    }
}

impl<T> Pointer for SharedPtr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Pointer::fmt(&self.ptr, f)
    }
}

impl<T: Hash> Hash for SharedPtr<T> {
    /// Pass the managed value (if any) to the provided hasher.
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        SharedPtr::get(self).hash(state);
    }
}

impl<T: PartialEq> PartialEq for SharedPtr<T> {
    /// Equality by value comparison for two `SharedPtr<T>`s, even if the objects
    /// are in different allocations. Empty handles compare equal to each other
    /// and unequal to every owning handle.
    /// ```
    /// use sharedptr::SharedPtr;
    ///
    /// let sp1 = SharedPtr::from(100);
    /// let sp2 = SharedPtr::from(100);
    /// assert!(sp1 == sp2);
    /// ```
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        SharedPtr::get(self).eq(&SharedPtr::get(other))
    }
}

impl<T: Eq> Eq for SharedPtr<T> {}

impl<T: PartialOrd> PartialOrd for SharedPtr<T> {
    /// Partial comparison of the managed values; an empty handle orders before
    /// every owning handle.
    /// ```
    /// use sharedptr::SharedPtr;
    /// use std::cmp::Ordering;
    ///
    /// let sp1 = SharedPtr::from(100);
    /// let sp2 = SharedPtr::from(200);
    /// assert_eq!(Some(Ordering::Less), sp1.partial_cmp(&sp2));
    /// ```
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        SharedPtr::get(self).partial_cmp(&SharedPtr::get(other))
    }
}

impl<T: Ord> Ord for SharedPtr<T> {
    /// Comparison of the managed values; an empty handle orders before every
    /// owning handle.
    /// ```
    /// use sharedptr::SharedPtr;
    /// use std::cmp::Ordering;
    ///
    /// let sp1 = SharedPtr::from(100);
    /// let sp2 = SharedPtr::from(200);
    /// assert_eq!(Ordering::Less, sp1.cmp(&sp2));
    /// ```
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        SharedPtr::get(self).cmp(&SharedPtr::get(other))
    }
}
