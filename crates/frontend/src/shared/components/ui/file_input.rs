use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

/// Hidden file input behind a styled label. Reports the chosen file (or
/// `None` when the picker is cleared) through `on_file`.
#[component]
pub fn FileInput(
    /// ID for the input element; also ties the label to it.
    #[prop(into)]
    id: String,
    /// Accepted extensions, e.g. ".csv" or ".xlsm".
    #[prop(optional, into)]
    accept: MaybeProp<String>,
    /// Text on the picker button.
    #[prop(into)]
    prompt: String,
    /// Name of the currently chosen file, shown next to the button.
    #[prop(optional, into)]
    file_name: MaybeProp<String>,
    /// Called with the first file of the selection.
    on_file: Callback<Option<web_sys::File>>,
) -> impl IntoView {
    let input_id = StoredValue::new(id);
    let accept_attr = move || accept.get().unwrap_or_default();

    view! {
        <div class="file-input">
            <label class="file-input__button" for=move || input_id.get_value()>
                {prompt}
            </label>
            <input
                id=move || input_id.get_value()
                class="file-input__native"
                type="file"
                accept=accept_attr
                on:change=move |ev| {
                    let file = ev
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                        .and_then(|input| input.files())
                        .and_then(|files| files.get(0));
                    on_file.run(file);
                }
            />
            {move || file_name.get().map(|name| view! {
                <span class="file-input__name">{name}</span>
            })}
        </div>
    }
}
