use criterion::{black_box, criterion_group, criterion_main, Criterion};

use presetcard::catalog::ItemCatalog;
use presetcard::layout::compute_layout;
use presetcard::models::{ItemMetadata, PresetRecord, Slot, SupportList};
use presetcard::normalize::normalize;

fn catalog() -> ItemCatalog {
    let entries = std::iter::once("404item".to_string())
        .chain((0..200).map(|i| format!("item-{i}")))
        .map(|label| ItemMetadata {
            display_name: label.to_uppercase(),
            icon_uri: format!("icons/{label}.png"),
            is_fallback_sprite: label == "404item",
            label,
        })
        .collect();
    ItemCatalog::new(entries).unwrap()
}

fn full_preset() -> PresetRecord {
    PresetRecord {
        preset_name: "Bench".to_string(),
        preset_notes: None,
        inventory_slots: (0..28).map(|i| Some(Slot::new(format!("item-{i}")))).collect(),
        equipment_slots: (0..13).map(|i| Some(Slot::new(format!("item-{i}")))).collect(),
        relics: SupportList {
            primary: (0..3).map(|i| Some(Slot::new(format!("item-{i}")))).collect(),
            alternative: (0..4).map(|i| Some(Slot::new(format!("item-{i}")))).collect(),
        },
        familiars: SupportList {
            primary: vec![Some(Slot::new("item-0"))],
            alternative: vec![Some(Slot::new("item-1"))],
        },
    }
}

fn bench_normalize(c: &mut Criterion) {
    let catalog = catalog();
    let raw = full_preset();
    c.bench_function("normalize_full_preset", |b| {
        b.iter(|| normalize(black_box(&raw), &catalog))
    });
}

fn bench_layout(c: &mut Criterion) {
    let catalog = catalog();
    let preset = normalize(&full_preset(), &catalog);
    c.bench_function("compute_layout_full_preset", |b| {
        b.iter(|| compute_layout(black_box(&preset), 160))
    });
}

criterion_group!(benches, bench_normalize, bench_layout);
criterion_main!(benches);
