use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io::Cursor;
use wadtools::query::map_names_from_reader;
use wadtools::{combine, CombineOptions, LumpName, Wad, PWAD};

fn sample_wad(maps: usize) -> Wad {
    let mut lumps = Vec::new();
    for m in 0..maps {
        lumps.push((LumpName::new(&format!("MAP{:02}", m + 1)).unwrap(), Vec::new()));
        for (name, size) in [("THINGS", 2_000), ("LINEDEFS", 20_000), ("SIDEDEFS", 60_000), ("SECTORS", 8_000)] {
            lumps.push((LumpName::new(name).unwrap(), vec![m as u8; size]));
        }
    }
    Wad::from_lumps(PWAD, lumps).unwrap()
}

fn bench_read(c: &mut Criterion) {
    let bytes = sample_wad(32).to_bytes().unwrap();

    c.bench_function("open_32_maps", |b| b.iter(|| Wad::from_bytes(black_box(&bytes)).unwrap()));
    c.bench_function("map_names_directory_only", |b| {
        b.iter(|| map_names_from_reader(Cursor::new(black_box(&bytes))).unwrap())
    });
}

fn bench_write(c: &mut Criterion) {
    let wad = sample_wad(32);

    c.bench_function("write_32_maps", |b| b.iter(|| black_box(&wad).to_bytes().unwrap()));
}

fn bench_combine(c: &mut Criterion) {
    let parts: Vec<Wad> = (0..4).map(|_| sample_wad(8)).collect();

    c.bench_function("combine_4x8_maps", |b| {
        b.iter(|| combine(black_box(parts.clone()), &CombineOptions::default()).unwrap())
    });
}

criterion_group!(benches, bench_read, bench_write, bench_combine);
criterion_main!(benches);
