use eframe::egui::{self, Color32, Pos2, RichText, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{category_color, rating_color};
use crate::data::model::{BookTable, PriceCategory};
use crate::data::stats;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central dashboard
// ---------------------------------------------------------------------------

/// Render the full dashboard (KPIs + charts + drill-through) over the
/// current filtered view.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = state.table.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a book inventory CSV to start  (File → Open…)");
        });
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("📚 Book Inventory Insights");
            ui.separator();

            kpi_strip(ui, &table, &state.visible_indices);
            ui.separator();

            if state.visible_indices.is_empty() {
                ui.label(RichText::new("No records match the current filters.").weak());
            } else {
                ui.columns(2, |cols: &mut [Ui]| {
                    category_bar_chart(&mut cols[0], &table, &state.visible_indices);
                    category_box_plot(&mut cols[1], &table, &state.visible_indices);
                });
                ui.separator();

                ui.columns(2, |cols: &mut [Ui]| {
                    market_share_pie(&mut cols[0], &table, &state.visible_indices);
                    rating_bar_chart(&mut cols[1], &table, &state.visible_indices);
                });
                ui.separator();

                ui.columns(2, |cols: &mut [Ui]| {
                    trend_scatter(&mut cols[0], &table, &state.visible_indices);
                    top_ten_chart(&mut cols[1], &table, &state.visible_indices);
                });
                ui.separator();
            }

            super::table::drill_through(ui, state, &table);
        });
}

// ---------------------------------------------------------------------------
// KPI strip
// ---------------------------------------------------------------------------

fn kpi_strip(ui: &mut Ui, table: &BookTable, indices: &[usize]) {
    let s = stats::summary(table, indices);
    ui.columns(4, |cols: &mut [Ui]| {
        kpi(&mut cols[0], "Total Inventory", format!("{} Books", s.count));
        kpi(&mut cols[1], "Avg. Price", format!("${:.2}", s.mean_price));
        kpi(&mut cols[2], "Highest Price", format!("${:.2}", s.max_price));
        kpi(
            &mut cols[3],
            "Avg. Title Length",
            format!("{} Chars", s.mean_title_length as i64),
        );
    });
}

fn kpi(ui: &mut Ui, label: &str, value: String) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).heading());
    });
}

// ---------------------------------------------------------------------------
// Category charts
// ---------------------------------------------------------------------------

fn category_bar_chart(ui: &mut Ui, table: &BookTable, indices: &[usize]) {
    ui.strong("Book counts by category");
    let counts = stats::category_counts(table, indices);

    let bars: Vec<Bar> = PriceCategory::ALL
        .iter()
        .enumerate()
        .filter_map(|(i, cat)| {
            counts.get(cat).map(|&n| {
                Bar::new(i as f64, n as f64)
                    .name(cat.as_str())
                    .fill(category_color(*cat))
                    .width(0.6)
            })
        })
        .collect();

    Plot::new("category_bar")
        .height(220.0)
        .legend(Legend::default())
        .x_axis_formatter(|mark, _range| category_axis_label(mark.value))
        .show_grid([false, true])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn category_box_plot(ui: &mut Ui, table: &BookTable, indices: &[usize]) {
    ui.strong("Price spread within categories");
    let groups = stats::prices_by_category(table, indices);

    let mut elems = Vec::new();
    for (i, cat) in PriceCategory::ALL.iter().enumerate() {
        let Some(prices) = groups.get(cat) else {
            continue;
        };
        let Some(spread) = box_spread(prices) else {
            continue;
        };
        elems.push(
            BoxElem::new(i as f64, spread)
                .name(cat.as_str())
                .fill(category_color(*cat).gamma_multiply(0.6))
                .stroke(Stroke::new(1.0, category_color(*cat))),
        );
    }

    Plot::new("category_box")
        .height(220.0)
        .x_axis_formatter(|mark, _range| category_axis_label(mark.value))
        .y_axis_label("Price ($)")
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(elems));
        });
}

fn category_axis_label(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 0.01 {
        return String::new();
    }
    match rounded as i64 {
        0 => "Low".to_string(),
        1 => "Medium".to_string(),
        2 => "High".to_string(),
        _ => String::new(),
    }
}

/// Five-number summary for one box: whiskers at min/max, quartiles by the
/// midpoint method. `None` when the group is empty.
fn box_spread(prices: &[f64]) -> Option<BoxSpread> {
    if prices.is_empty() {
        return None;
    }
    let mut sorted = prices.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q = |frac: f64| -> f64 {
        let pos = frac * (sorted.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        let t = pos - lo as f64;
        sorted[lo] * (1.0 - t) + sorted[hi] * t
    };
    Some(BoxSpread::new(
        sorted[0],
        q(0.25),
        q(0.5),
        q(0.75),
        sorted[sorted.len() - 1],
    ))
}

// ---------------------------------------------------------------------------
// Market share pie
// ---------------------------------------------------------------------------

fn market_share_pie(ui: &mut Ui, table: &BookTable, indices: &[usize]) {
    ui.strong("Market share by category");
    let counts = stats::category_counts(table, indices);
    let total: usize = counts.values().sum();
    if total == 0 {
        ui.label(RichText::new("no data").weak());
        return;
    }

    let (response, painter) =
        ui.allocate_painter(Vec2::new(ui.available_width(), 220.0), egui::Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let radius = (rect.height().min(rect.width()) * 0.5 - 8.0).max(10.0);

    let mut start_angle = -std::f32::consts::FRAC_PI_2;
    for (cat, &n) in &counts {
        let sweep = (n as f32 / total as f32) * std::f32::consts::TAU;
        paint_sector(&painter, center, radius, start_angle, sweep, category_color(*cat));
        start_angle += sweep;
    }
    // Donut hole, matching the original chart.
    painter.circle_filled(center, radius * 0.4, ui.visuals().panel_fill);

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (cat, &n) in &counts {
            let pct = 100.0 * n as f64 / total as f64;
            ui.label(
                RichText::new(format!("■ {cat}: {pct:.1}%")).color(category_color(*cat)),
            );
        }
    });
}

fn paint_sector(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    start_angle: f32,
    sweep: f32,
    color: Color32,
) {
    // Convex fan: one vertex per ~3 degrees along the arc.
    let steps = ((sweep / 0.05).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let angle = start_angle + sweep * (i as f32 / steps as f32);
        points.push(center + radius * Vec2::new(angle.cos(), angle.sin()));
    }
    painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
}

// ---------------------------------------------------------------------------
// Rating distribution
// ---------------------------------------------------------------------------

fn rating_bar_chart(ui: &mut Ui, table: &BookTable, indices: &[usize]) {
    ui.strong("Ratings distribution");
    let counts = stats::rating_counts(table, indices);

    let bars: Vec<Bar> = counts
        .iter()
        .map(|(&score, &n)| {
            Bar::new(f64::from(score), n as f64)
                .name(format!("{score} ★"))
                .fill(rating_color(score))
                .width(0.6)
        })
        .collect();

    Plot::new("rating_bar")
        .height(220.0)
        .x_axis_label("Rating")
        .show_grid([false, true])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Title length vs price, with linear trend
// ---------------------------------------------------------------------------

fn trend_scatter(ui: &mut Ui, table: &BookTable, indices: &[usize]) {
    ui.strong("Title length vs price (linear trend)");

    let trend = stats::linear_trend(table, indices);

    Plot::new("trend_scatter")
        .height(220.0)
        .legend(Legend::default())
        .x_axis_label("Length of title")
        .y_axis_label("Price ($)")
        .show(ui, |plot_ui| {
            for cat in PriceCategory::ALL {
                let points: PlotPoints = indices
                    .iter()
                    .map(|&i| &table.records[i])
                    .filter(|r| r.price_category == cat)
                    .map(|r| [f64::from(r.title_length), r.price])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(cat.as_str())
                        .color(category_color(cat))
                        .radius(2.5),
                );
            }

            if let Some((slope, intercept)) = trend {
                let (x_min, x_max) = indices
                    .iter()
                    .map(|&i| f64::from(table.records[i].title_length))
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                        (lo.min(x), hi.max(x))
                    });
                let line: PlotPoints = [x_min, x_max]
                    .iter()
                    .map(|&x| [x, slope * x + intercept])
                    .collect();
                plot_ui.line(
                    Line::new(line)
                        .name("OLS trend")
                        .color(Color32::GRAY)
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Top-10 leaderboard
// ---------------------------------------------------------------------------

fn top_ten_chart(ui: &mut Ui, table: &BookTable, indices: &[usize]) {
    ui.strong("🏆 Top 10 most expensive");
    let top = stats::top_by_price(table, indices, 10);

    // Most expensive on top: rank 0 gets the highest y position.
    let n = top.len();
    let bars: Vec<Bar> = top
        .iter()
        .enumerate()
        .map(|(rank, &i)| {
            let r = &table.records[i];
            Bar::new((n - 1 - rank) as f64, r.price)
                .name(format!("{} (${:.2})", r.title, r.price))
                .fill(Color32::from_rgb(0xD6, 0x2F, 0x2F).gamma_multiply(
                    1.0 - 0.06 * rank as f32,
                ))
                .width(0.6)
                .horizontal()
        })
        .collect();

    Plot::new("top_ten")
        .height(220.0)
        .x_axis_label("Price ($)")
        .show_grid([true, false])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
