use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minifunction::Function;

fn bench_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("call");

    let a = 2;
    let inline: Function<dyn Fn(i32) -> i32> = Function::new(move |b: i32| a + b);
    group.bench_function("function_inline", |b| {
        b.iter(|| inline.call(black_box(3)));
    });

    let padding = [2i32; 8];
    let boxed: Function<dyn Fn(i32) -> i32> = Function::new(move |b: i32| padding[0] + b);
    group.bench_function("function_boxed", |b| {
        b.iter(|| boxed.call(black_box(3)));
    });

    // Comparison with a boxed trait object.
    let dynamic: Box<dyn Fn(i32) -> i32> = Box::new(move |b: i32| a + b);
    group.bench_function("box_dyn_fn", |b| {
        b.iter(|| dynamic(black_box(3)));
    });

    group.finish();
}

fn bench_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");

    group.bench_function("new_clone_drop_inline", |b| {
        b.iter(|| {
            let a = black_box(2);
            let f: Function<dyn Fn(i32) -> i32> = Function::new(move |b: i32| a + b);
            black_box(f.clone())
        });
    });

    group.bench_function("new_clone_drop_boxed", |b| {
        b.iter(|| {
            let padding = [black_box(2i32); 8];
            let f: Function<dyn Fn(i32) -> i32> = Function::new(move |b: i32| padding[0] + b);
            black_box(f.clone())
        });
    });

    group.bench_function("swap", |b| {
        let padding = [2i32; 8];
        let mut f: Function<dyn Fn(i32) -> i32> = Function::new(move |b: i32| padding[0] + b);
        let mut g: Function<dyn Fn(i32) -> i32> = Function::new(|b: i32| b);

        b.iter(|| f.swap(black_box(&mut g)));
    });

    group.finish();
}

criterion_group!(benches, bench_call, bench_lifecycle);
criterion_main!(benches);
