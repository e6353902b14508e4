use contracts::shared::analytics::debounce::Millis;

/// Wall clock in milliseconds, fed into the debounce state machines
pub fn now_ms() -> Millis {
    js_sys::Date::now().max(0.0) as Millis
}
