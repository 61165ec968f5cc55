use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strand_scan::Kernel;

fn find_byte_kernel(kernel: Kernel, hay: &[u8], c: u8) -> Option<usize> {
    let w = kernel.width();
    let mut i = 0;
    if w > 0 {
        while i + w <= hay.len() {
            let mask = kernel.match_byte(&hay[i..i + w], c);
            if mask != 0 {
                return Some(i + mask.trailing_zeros() as usize);
            }
            i += w;
        }
    }
    hay[i..].iter().position(|&b| b == c).map(|p| i + p)
}

fn bench_match_byte(c: &mut Criterion) {
    let mut hay = vec![0u8; 64 * 1024];
    let last = hay.len() - 1;
    hay[last] = b'#';
    let kernel = Kernel::current();

    let mut group = c.benchmark_group("find_byte");
    group.bench_function("kernel", |b| {
        b.iter(|| find_byte_kernel(kernel, black_box(&hay), b'#'))
    });
    group.bench_function("per_byte", |b| {
        b.iter(|| black_box(&hay).iter().position(|&x| x == b'#'))
    });
    group.finish();
}

criterion_group!(benches, bench_match_byte);
criterion_main!(benches);
