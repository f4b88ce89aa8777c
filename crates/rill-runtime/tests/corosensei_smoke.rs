//! Smoke test: corosensei links and switches stacks on this target, including
//! suspending from inside a nested Rust callback the way enumerator cursors do.

use corosensei::{Coroutine, CoroutineResult, Yielder};

fn each_upto(n: i32, block: &mut dyn FnMut(i32)) {
    for i in 0..n {
        block(i);
    }
}

#[test]
fn suspend_from_nested_callback() {
    let mut coro = Coroutine::new(|yielder: &Yielder<(), i32>, ()| {
        each_upto(3, &mut |i| yielder.suspend(i * 10));
        "done"
    });

    let mut seen = Vec::new();
    loop {
        match coro.resume(()) {
            CoroutineResult::Yield(v) => seen.push(v),
            CoroutineResult::Return(tag) => {
                assert_eq!(tag, "done");
                break;
            }
        }
    }
    assert_eq!(seen, vec![0, 10, 20]);
}

#[test]
fn coroutine_immediate_return() {
    let mut coro = Coroutine::new(|_yielder: &Yielder<i32, i32>, input: i32| input + 42);

    match coro.resume(0) {
        CoroutineResult::Yield(_) => panic!("expected immediate return"),
        CoroutineResult::Return(val) => assert_eq!(val, 42),
    }
}
