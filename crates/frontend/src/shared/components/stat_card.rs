use crate::shared::icons::icon;
use crate::shared::number_format::{format_compact, format_money, format_number_int};
use contracts::shared::analytics::format_growth;
use leptos::prelude::*;

/// How the card renders its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFormat {
    Money,
    Compact,
    Integer,
}

fn format_value(val: f64, fmt: CardFormat) -> String {
    match fmt {
        CardFormat::Money => format_money(val),
        CardFormat::Compact => format!("${}", format_compact(val)),
        CardFormat::Integer => format_number_int(val),
    }
}

fn growth_class(rate: Option<f64>) -> &'static str {
    match rate {
        Some(r) if r > 0.0 => "stat-card__change stat-card__change--up",
        Some(r) if r < 0.0 => "stat-card__change stat-card__change--down",
        _ => "stat-card__change stat-card__change--flat",
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// Primary numeric value (None = loading/error)
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: CardFormat,
    /// Growth vs. previous period as a fraction; not shown when absent
    #[prop(into, optional)]
    growth: Signal<Option<f64>>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => format_value(v, format),
        None => "—".to_string(),
    };

    let change_view = move || {
        let rate = growth.get();
        rate.map(|_| view! { <span class=growth_class(rate)>{format_growth(rate)}</span> })
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {formatted}
                    {change_view}
                </div>
                {subtitle_view}
            </div>
        </div>
    }
}
