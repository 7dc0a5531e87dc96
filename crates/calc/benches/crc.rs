use calc::{Calculator, Catalog, Crc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const BUF_LEN: usize = 64 * 1024;

fn crc_throughput(c: &mut Criterion) {
  let catalog = Catalog::builtin().expect("builtin catalogue");
  let data: Vec<u8> = (0..BUF_LEN).map(|i| (i * 31 % 251) as u8).collect();

  let mut group = c.benchmark_group("crc/update_bytes");
  group.throughput(Throughput::Bytes(BUF_LEN as u64));
  for id in ["crc-16/ccitt-false", "crc-32/iso-hdlc", "crc-82/darc"] {
    let model = catalog.find(id).expect("preset model").clone();
    group.bench_with_input(BenchmarkId::from_parameter(id), &model, |b, model| {
      b.iter(|| {
        let mut crc = Crc::new(model.clone());
        crc.update_bytes(&data);
        crc.register()
      });
    });
  }
  group.finish();
}

fn table_construction(c: &mut Criterion) {
  let catalog = Catalog::builtin().expect("builtin catalogue");
  let model = catalog.find("crc-32/iso-hdlc").expect("preset model").clone();
  c.bench_function("crc/build_table", |b| b.iter(|| Crc::new(model.clone())));
}

criterion_group!(benches, crc_throughput, table_construction);
criterion_main!(benches);
