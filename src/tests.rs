use std::{cell::Cell, mem, rc::Rc};

use crate::shared_ptr::SharedPtr;

struct Data {
    string: String,
    int: i32,
}

/// Payload whose destructor bumps a counter, to observe exactly when (and how
/// many times) the managed object is freed.
struct Tally(Rc<Cell<usize>>);

impl Drop for Tally {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

fn tallied() -> (Rc<Cell<usize>>, SharedPtr<Tally>) {
    let drops = Rc::new(Cell::new(0));
    let sp = SharedPtr::new(Tally(drops.clone()));
    (drops, sp)
}

#[test]
fn test_basic() {
    let data = Data {
        string: String::from("This is data."),
        int: 123,
    };

    let mut sp = SharedPtr::new(data);
    println!("Deref test! {}", sp.int);
    SharedPtr::get_mut(&mut sp).unwrap().string = String::from("This is also data");
    println!("Deref test! {}", sp.string);
    assert_eq!(sp.int, 123);
}

#[test]
fn test_default_is_empty() {
    let sp = SharedPtr::<i32>::default();
    assert!(SharedPtr::is_null(&sp));
    assert!(SharedPtr::as_ptr(&sp).is_null());
    assert!(SharedPtr::get(&sp).is_none());
    assert_eq!(SharedPtr::strong_count(&sp), 0);
}

#[test]
fn test_new_is_unique_owner() {
    let sp = SharedPtr::new(100);
    assert!(!SharedPtr::is_null(&sp));
    assert_eq!(SharedPtr::strong_count(&sp), 1);
    assert_eq!(*sp, 100);
}

#[test]
fn test_adopt_raw_pointer() {
    let raw = Box::into_raw(Box::new(100));
    let sp = unsafe { SharedPtr::from_raw(raw) };
    assert_eq!(SharedPtr::as_ptr(&sp), raw);
    assert_eq!(SharedPtr::strong_count(&sp), 1);
    assert_eq!(*sp, 100);
}

#[test]
fn test_adopt_null_pointer() {
    let sp = unsafe { SharedPtr::<i32>::from_raw(std::ptr::null_mut()) };
    assert!(SharedPtr::is_null(&sp));
    assert_eq!(SharedPtr::strong_count(&sp), 0);
}

#[test]
fn test_clone_shares_object() {
    let a = SharedPtr::new(100);
    let b = a.clone();
    assert!(SharedPtr::ptr_eq(&a, &b));
    assert_eq!(*a, *b);
    assert_eq!(SharedPtr::strong_count(&a), 2);
    assert_eq!(SharedPtr::strong_count(&b), 2);
}

#[test]
fn test_object_survives_inner_scope() {
    let a = SharedPtr::new(Data {
        string: String::from("widget"),
        int: 1,
    });
    {
        let b = a.clone();
        assert_eq!(b.string, a.string);
    }
    assert!(!SharedPtr::as_ptr(&a).is_null());
    assert_eq!(SharedPtr::strong_count(&a), 1);
    assert_eq!(a.string, "widget");
}

#[test]
fn test_last_owner_frees_exactly_once() {
    let (drops, sp) = tallied();

    let mut copies = Vec::new();
    for _ in 0..10 {
        copies.push(sp.clone());
    }
    assert_eq!(SharedPtr::strong_count(&sp), 11);
    assert_eq!(drops.get(), 0);

    drop(sp);
    assert_eq!(drops.get(), 0);
    drop(copies);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_move_transfers_without_increment() {
    let a = SharedPtr::new(100);
    let b = a.clone();
    let c = b;
    assert_eq!(SharedPtr::strong_count(&c), 2);
    drop(a);
    assert_eq!(SharedPtr::strong_count(&c), 1);
    assert_eq!(*c, 100);
}

#[test]
fn test_take_leaves_source_empty() {
    let (drops, mut a) = tallied();
    let b = mem::take(&mut a);
    assert!(SharedPtr::is_null(&a));
    assert!(SharedPtr::get(&a).is_none());
    assert_eq!(SharedPtr::strong_count(&b), 1);
    assert_eq!(drops.get(), 0);
    drop(b);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_reset_same_pointer_is_noop() {
    let (drops, mut sp) = tallied();
    let keep = sp.clone();

    unsafe { SharedPtr::reset(&mut sp, SharedPtr::as_ptr(&keep)) };
    assert_eq!(SharedPtr::strong_count(&sp), 2);
    assert_eq!(drops.get(), 0);
    assert!(SharedPtr::ptr_eq(&sp, &keep));
}

#[test]
fn test_reset_releases_previous_object() {
    let (drops, mut sp) = tallied();

    unsafe { SharedPtr::reset(&mut sp, Box::into_raw(Box::new(Tally(drops.clone())))) };
    assert_eq!(drops.get(), 1);
    assert_eq!(SharedPtr::strong_count(&sp), 1);

    drop(sp);
    assert_eq!(drops.get(), 2);
}

#[test]
fn test_reset_decrements_when_shared() {
    let (drops, mut sp) = tallied();
    let keep = sp.clone();

    unsafe { SharedPtr::reset(&mut sp, std::ptr::null_mut()) };
    assert!(SharedPtr::is_null(&sp));
    assert_eq!(drops.get(), 0);
    assert_eq!(SharedPtr::strong_count(&keep), 1);

    drop(keep);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_clear_releases_ownership() {
    let (drops, mut sp) = tallied();
    SharedPtr::clear(&mut sp);
    assert!(SharedPtr::is_null(&sp));
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_swap_is_count_neutral() {
    let (drops_a, mut a) = tallied();
    let (drops_b, mut b) = tallied();
    let a2 = a.clone();

    let ptr_a = SharedPtr::as_ptr(&a);
    let ptr_b = SharedPtr::as_ptr(&b);

    SharedPtr::swap(&mut a, &mut b);
    assert_eq!(SharedPtr::as_ptr(&a), ptr_b);
    assert_eq!(SharedPtr::as_ptr(&b), ptr_a);
    assert_eq!(SharedPtr::strong_count(&a), 1);
    assert_eq!(SharedPtr::strong_count(&b), 2);
    assert_eq!(drops_a.get(), 0);
    assert_eq!(drops_b.get(), 0);

    SharedPtr::swap(&mut a, &mut b);
    assert_eq!(SharedPtr::as_ptr(&a), ptr_a);
    assert!(SharedPtr::ptr_eq(&a, &a2));
    assert_eq!(SharedPtr::strong_count(&a), 2);
    assert_eq!(drops_a.get(), 0);
    assert_eq!(drops_b.get(), 0);
}

#[test]
fn test_clone_from_same_object_is_noop() {
    let a = SharedPtr::new(100);
    let mut b = a.clone();
    b.clone_from(&a);
    assert_eq!(SharedPtr::strong_count(&a), 2);
    assert!(SharedPtr::ptr_eq(&a, &b));
}

#[test]
fn test_clone_from_releases_previous_object() {
    let (drops_a, a) = tallied();
    let (drops_b, mut b) = tallied();

    b.clone_from(&a);
    assert_eq!(drops_b.get(), 1);
    assert_eq!(drops_a.get(), 0);
    assert!(SharedPtr::ptr_eq(&a, &b));
    assert_eq!(SharedPtr::strong_count(&a), 2);
}

#[test]
fn test_get_mut_requires_unique_owner() {
    let mut sp = SharedPtr::new(100);
    *SharedPtr::get_mut(&mut sp).unwrap() = 200;
    assert_eq!(*sp, 200);

    let other = sp.clone();
    assert!(SharedPtr::get_mut(&mut sp).is_none());
    drop(other);

    assert!(SharedPtr::get_mut(&mut sp).is_some());
    assert!(SharedPtr::get_mut(&mut SharedPtr::<i32>::null()).is_none());
}

#[test]
fn test_try_unwrap() {
    let sp = SharedPtr::new(100);
    assert_eq!(SharedPtr::try_unwrap(sp), Ok(100));

    let sp = SharedPtr::new(100);
    let sp2 = sp.clone();
    let sp = SharedPtr::try_unwrap(sp).unwrap_err();
    assert_eq!(SharedPtr::strong_count(&sp), 2);
    drop(sp2);
    assert_eq!(SharedPtr::try_unwrap(sp), Ok(100));

    assert!(SharedPtr::try_unwrap(SharedPtr::<i32>::null()).is_err());
}

#[test]
fn test_try_unwrap_does_not_drop_value() {
    let (drops, sp) = tallied();
    let value = SharedPtr::try_unwrap(sp).ok().unwrap();
    assert_eq!(drops.get(), 0);
    drop(value);
    assert_eq!(drops.get(), 1);
}

#[test]
#[should_panic(expected = "Dereferenced an empty SharedPtr.")]
fn test_deref_empty_panics() {
    let sp = SharedPtr::<i32>::null();
    let _ = *sp;
}

#[test]
fn test_value_equality() {
    let a = SharedPtr::new(100);
    let b = SharedPtr::new(100);
    let c = SharedPtr::new(200);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(SharedPtr::<i32>::null(), SharedPtr::<i32>::null());
    assert_ne!(a, SharedPtr::null());
    assert!(SharedPtr::<i32>::null() < a);
    assert!(a < c);
}
