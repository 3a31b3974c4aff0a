use leptos::prelude::*;

/// Labeled select over `(value, label)` pairs. Used for the variation type
/// picker and the history status/origin filters; the chosen value is the
/// wire string the backend expects, passed through verbatim.
#[component]
pub fn Select(
    /// Label shown above the field
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Currently selected option value
    #[prop(into)]
    value: Signal<String>,
    /// Receives the selected option value on change
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    /// Options as (value, label) pairs
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label">
                    {l}
                </label>
            })}
            <select
                class="form__select"
                on:change=move |ev| {
                    if let Some(handler) = on_change {
                        handler.run(event_target_value(&ev));
                    }
                }
            >
                <For
                    each=move || options.get()
                    key=|(option_value, _)| option_value.clone()
                    children=move |(option_value, option_label)| {
                        let this_value = option_value.clone();
                        view! {
                            <option
                                value=option_value
                                selected=move || value.get() == this_value
                            >
                                {option_label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
