// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use halide::cache::EntityCache;
use halide::model::{GeoPoint, Role, RoleFilter, User, UserId};
use halide::store::{collections, MemoryStore};

// Benchmark identity (keep stable):
// - Group name in this file: `cache.filter_users`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `small`, `large`).
fn seeded_cache(count: usize) -> EntityCache {
    let store = MemoryStore::new();
    for i in 0..count {
        let id = UserId::new(format!("u-{i}")).expect("user id");
        let mut user = User::new(id.clone(), format!("Talent {i}"));
        user.set_roles(vec![match i % 3 {
            0 => Role::Model,
            1 => Role::Photographer,
            _ => Role::Videographer,
        }]);
        user.set_headline(format!("Portrait et mode, studio {i}"));
        user.set_available_now(i % 2 == 0);
        user.set_location(GeoPoint {
            lat: 48.8 + (i as f64) * 1e-4,
            lng: 2.3 + (i as f64) * 1e-4,
        });
        let doc = serde_json::to_value(&user).expect("user encodes");
        store.set(collections::USERS, id.as_str(), doc);
    }
    let mut cache = EntityCache::new();
    cache.prime(&store);
    cache
}

fn benches_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache.filter_users");

    for (case_id, count) in [("small", 50usize), ("large", 5_000usize)] {
        let cache = seeded_cache(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(case_id, move |b| {
            b.iter(|| {
                let matches = cache.filter_users(
                    black_box(RoleFilter::Only(Role::Photographer)),
                    black_box(true),
                    black_box("studio"),
                );
                black_box(matches.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benches_filter);
criterion_main!(benches);
