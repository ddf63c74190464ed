use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use raumplan::grid::{week_states, GridCell, GridConfig};
use raumplan::selection::Selection;
use raumplan::time::{Conflicts, TimeInterval};

fn select_and_render(c: &mut Criterion) {
    let config = GridConfig::default();
    let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let days: Vec<NaiveDate> = (0..7)
        .map(|offset| monday + chrono::Duration::days(offset))
        .collect();

    // one busy week: every other slot of every day taken
    let booked: Vec<TimeInterval> = days
        .iter()
        .flat_map(|&day| {
            (8..20)
                .step_by(2)
                .map(move |hour| TimeInterval::from_day_hours(day, hour, 1))
        })
        .collect();

    c.bench_function("conflict_scan", |b| {
        let candidate = TimeInterval::from_day_hours(monday + chrono::Duration::days(3), 13, 3);

        b.iter(|| black_box(booked.iter().conflicts_with(&candidate)));
    });

    c.bench_function("click_sequence", |b| {
        let clicks = [
            (0, 9),
            (0, 11),
            (1, 13),
            (1, 15),
            (4, 17),
            (4, 19),
            (6, 9),
        ];

        b.iter(|| {
            let mut sel = Selection::Empty;
            for &(day, hour) in clicks.iter() {
                sel = sel.click(
                    GridCell::new(days[day], hour),
                    &booked,
                    now,
                    &config,
                );
            }
            black_box(sel)
        });
    });

    c.bench_function("week_render_states", |b| {
        let sel = Selection::Anchored {
            day: days[2],
            hour: 13,
            duration: 1,
        };

        b.iter(|| black_box(week_states(&days, sel, &booked, now, &config)));
    });
}

criterion_group!(benches, select_and_render);
criterion_main!(benches);
