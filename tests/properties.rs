use {
    minifunction::{BadFunctionCall, Function},
    proptest::prelude::*,
    std::cell::Cell,
};

fn inline_adder(a: i32) -> Function<dyn Fn(i32) -> i32> {
    Function::new(move |b: i32| a.wrapping_add(b))
}

fn boxed_adder(a: i32) -> Function<dyn Fn(i32) -> i32> {
    let padding = [a; 8];
    Function::new(move |b: i32| padding[0].wrapping_add(b))
}

/// `Fn` accumulator keeping its running total in a captured `Cell`.
fn accumulator(boxed: bool) -> Function<dyn Fn(i64) -> i64> {
    let total = Cell::new(0i64);

    if boxed {
        let padding = [0i64; 4];
        Function::new(move |x: i64| {
            total.set(total.get() + x + padding[0]);
            total.get()
        })
    } else {
        Function::new(move |x: i64| {
            total.set(total.get() + x);
            total.get()
        })
    }
}

fn adder(a: i32, boxed: bool) -> Function<dyn Fn(i32) -> i32> {
    if boxed {
        boxed_adder(a)
    } else {
        inline_adder(a)
    }
}

proptest! {
    #[test]
    fn clone_outlives_original(a in any::<i32>(), boxed in any::<bool>(), xs in proptest::collection::vec(any::<i32>(), 1..16)) {
        let f = adder(a, boxed);
        let expected: Vec<_> = xs.iter().map(|&x| f.call(x)).collect();

        let g = f.clone();
        drop(f);

        prop_assert_eq!(g.is_boxed(), boxed);

        for (&x, expected) in xs.iter().zip(expected) {
            prop_assert_eq!(g.call(x), expected);
        }
    }

    #[test]
    fn take_transfers(a in any::<i32>(), boxed in any::<bool>(), x in any::<i32>()) {
        let mut f = adder(a, boxed);
        let expected = f.call(x);

        let g = f.take();

        prop_assert!(f.is_none());
        prop_assert_eq!(f.call(x), Err(BadFunctionCall));
        prop_assert_eq!(g.call(x), expected);
        prop_assert_eq!(g.is_boxed(), boxed);
    }

    #[test]
    fn swap_is_involution(
        a in any::<i32>(),
        b in any::<i32>(),
        a_boxed in any::<bool>(),
        b_boxed in any::<bool>(),
        a_empty in any::<bool>(),
        x in any::<i32>(),
    ) {
        let mut f = if a_empty { Function::empty() } else { adder(a, a_boxed) };
        let mut g = adder(b, b_boxed);

        let f_before = f.call(x);
        let g_before = g.call(x);

        f.swap(&mut g);

        prop_assert_eq!(f.call(x), g_before);
        prop_assert_eq!(g.call(x), f_before);

        f.swap(&mut g);

        prop_assert_eq!(f.call(x), f_before);
        prop_assert_eq!(g.call(x), g_before);
        prop_assert_eq!(f.is_boxed(), !a_empty && a_boxed);
        prop_assert_eq!(g.is_boxed(), b_boxed);
    }

    #[test]
    fn clones_do_not_share_state(ops in proptest::collection::vec((any::<bool>(), -1000i64..1000), 0..64)) {
        let mut total = 0i64;
        let mut first: Function<dyn FnMut(i64) -> i64> = Function::new(move |x: i64| {
            total += x;
            total
        });
        let mut second = first.clone();

        let mut model = [0i64; 2];

        for (use_first, x) in ops {
            let (f, slot) = if use_first {
                (&mut first, 0)
            } else {
                (&mut second, 1)
            };

            model[slot] += x;
            prop_assert_eq!(f.call(x), Ok(model[slot]));
        }
    }

    #[test]
    fn shared_calls_mutate_state(boxed in any::<bool>(), xs in proptest::collection::vec(-1000i64..1000, 1..32)) {
        let f = accumulator(boxed);
        prop_assert_eq!(f.is_boxed(), boxed);

        let mut total = 0i64;

        for (i, &x) in xs.iter().enumerate() {
            total += x;
            prop_assert_eq!(f.call(x), Ok(total));

            // Clones snapshot the state at the time of cloning.
            if i == 0 {
                let g = f.clone();
                prop_assert_eq!(g.call(0), Ok(total));
            }
        }
    }
}
