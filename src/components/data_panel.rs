//! Data Panel Component
//!
//! Export, import and save actions for the catalog document, plus the
//! recent log lines for troubleshooting sync.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_sync;
use crate::sync::SourceKind;

#[component]
pub fn DataPanel() -> impl IntoView {
    let sync = use_sync();
    let (log_lines, set_log_lines) = signal(Vec::<String>::new());

    let refresh_log = move || {
        let lines = board_logger::recent().iter().rev().map(|e| e.line()).collect();
        set_log_lines.set(lines);
    };
    refresh_log();

    let on_import = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            sync.import(file);
        }
        // allow picking the same file again
        input.set_value("");
    };

    let source_hint = match sync.kind() {
        SourceKind::FilePoll => "Changes stay in this browser until you export data.json and replace the file on the server.",
        SourceKind::Local => "Changes are saved on this device automatically.",
        SourceKind::Cloud => "Changes are saved to the cloud automatically.",
    };

    view! {
        <section class="data-panel">
            <h2>"Data"</h2>
            <p class="hint">{source_hint}</p>
            <div class="data-actions">
                <button type="button" class="primary-btn" on:click=move |_| sync.export()>
                    "Export data.json"
                </button>
                <label class="secondary-btn file-btn">
                    "Import JSON"
                    <input type="file" accept=".json,application/json" on:change=on_import />
                </label>
                <Show when=move || sync.autosaves()>
                    <button type="button" class="secondary-btn" on:click=move |_| sync.save(true)>
                        "Save now"
                    </button>
                </Show>
            </div>

            <details class="diagnostics">
                <summary>"Diagnostics"</summary>
                <button type="button" class="secondary-btn" on:click=move |_| refresh_log()>
                    "Refresh"
                </button>
                <pre class="log-lines">{move || log_lines.get().join("\n")}</pre>
            </details>
        </section>
    }
}
