use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hanseg_core::{HmmSegmenter, Model, ModelBuilder, Tag};

fn bench_model() -> Model {
    let mut builder = ModelBuilder::new();
    for from in Tag::ALL {
        builder.initial(from, -1.4);
        for to in Tag::ALL {
            builder.transition(from, to, -1.4);
        }
    }
    for (i, ch) in "我们是中国人今天天气很好去公园散步".chars().enumerate() {
        let tag = Tag::ALL[i % Tag::NUM_TAGS];
        builder.emission(tag, ch, -2.0 - i as f64 * 0.1);
    }
    builder.build()
}

fn bench_cut(c: &mut Criterion) {
    let segmenter = HmmSegmenter::new(bench_model());

    let inputs = vec![
        "我们是中国人",
        "今天天气很好我们去公园散步",
        "1987年11月，中国肯德基第1家餐厅落户北京；",
    ];

    c.bench_function("hmm_cut_short", |b| {
        b.iter(|| segmenter.cut(black_box(inputs[0])).unwrap());
    });

    c.bench_function("hmm_cut_batch_3", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = segmenter.cut(black_box(input)).unwrap();
            }
        });
    });
}

criterion_group!(benches, bench_cut);
criterion_main!(benches);
