//! Collector task submission with a resizable results pane.
//!
//! SYSTEM CONTEXT
//! ==============
//! The left pane edits a `TaskDraft`; the right pane shows the
//! Collectors/Tester/Reproducers tabs, with the backend's echo of the last
//! submitted task under Collectors. The divider drags between 10% and 90%.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

use leptos::prelude::*;
use records::task::{TaskRecord, clamp_split};

use crate::components::model_version_picker::ModelVersionPicker;
use crate::state::catalog::CatalogState;
use crate::state::task::{DraftList, TaskState, TaskTab, parse_size};
use crate::util::notify::{Notifier, use_notifier};

/// Left-pane width for a pointer at `client_x` over a container.
pub fn split_percent(client_x: f64, left: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return clamp_split(50.0);
    }
    clamp_split((client_x - left) / width * 100.0)
}

/// Display text for one `class_type` entry (`[lower, upper]`).
pub fn limits_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" - "),
        other => other.to_string(),
    }
}

fn load_classes(task: RwSignal<TaskState>, catalog: RwSignal<CatalogState>, notifier: Notifier) {
    task.update(TaskState::reset_classes);
    let Some((model, _)) = catalog.with(CatalogState::selection) else {
        return;
    };
    task.update(|t| t.loading_classes = true);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_model_classes(&model).await {
            Ok(classes) => task.update(|t| {
                t.available_classes = classes;
                t.loading_classes = false;
            }),
            Err(e) => {
                task.update(|t| t.loading_classes = false);
                notifier.api_error(&e);
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (model, notifier);
    }
}

#[component]
pub fn TaskPage() -> impl IntoView {
    let notifier = use_notifier();
    let catalog = RwSignal::new(CatalogState::default());
    let task = RwSignal::new(TaskState::default());
    let dragging = RwSignal::new(false);

    let on_selection = Callback::new(move |()| load_classes(task, catalog, notifier));

    let on_submit = move |_| {
        if task.with(|t| t.submitting) {
            return;
        }
        let (model, version) = catalog.with(|c| (c.model.clone(), c.version.clone()));
        let request = match task.with(|t| t.request(model, version)) {
            Ok(request) => request,
            Err(e) => {
                notifier.error(e.to_string());
                return;
            }
        };
        task.update(|t| t.submitting = true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::start_task(&request).await {
                Ok(reply) => {
                    notifier.success(reply.message.clone().unwrap_or_else(|| "Task started".to_owned()));
                    task.update(|t| {
                        t.reply = Some(reply);
                        t.tab = TaskTab::Collectors;
                    });
                }
                Err(e) => notifier.api_error(&e),
            }
            task.update(|t| t.submitting = false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
        }
    };

    let on_drag = move |ev: leptos::ev::MouseEvent| {
        if !dragging.get_untracked() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;

            if let Some(container) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
                let rect = container.get_bounding_client_rect();
                let percent = split_percent(f64::from(ev.client_x()), rect.left(), rect.width());
                task.update(|t| t.set_split(percent));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let size_input = move |label: &'static str, apply: fn(&mut TaskState, Option<u64>)| {
        view! {
            <label class="form-field">
                <span class="form-field__label">{label}</span>
                <input
                    class="form-field__input"
                    type="number"
                    min="0"
                    on:input=move |ev| {
                        let value = parse_size(&event_target_value(&ev));
                        task.update(|t| apply(t, value));
                    }
                />
            </label>
        }
    };

    let draft_list = move |list: DraftList, label: &'static str, placeholder: &'static str, add_label: &'static str| {
        let entries = move || {
            task.with(|t| match list {
                DraftList::Prompts => t.draft.prompts.clone(),
                DraftList::Urls => t.draft.urls.clone(),
            })
        };
        view! {
            <div class="form-field task-page__list">
                <span class="form-field__label">{label}</span>
                {move || {
                    entries()
                        .into_iter()
                        .enumerate()
                        .map(|(index, entry)| {
                            view! {
                                <div class="task-page__entry">
                                    <textarea
                                        class="form-field__input"
                                        placeholder=placeholder
                                        prop:value=entry
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            task.update(|t| t.update_entry(list, index, value));
                                        }
                                    ></textarea>
                                    <button
                                        class="btn btn--danger"
                                        type="button"
                                        on:click=move |_| task.update(|t| t.remove_entry(list, index))
                                    >
                                        "Remove"
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
                <button class="btn" type="button" on:click=move |_| task.update(|t| t.add_entry(list))>
                    {add_label}
                </button>
            </div>
        }
    };

    view! {
        <div
            class="task-page"
            class:task-page--dragging=move || dragging.get()
            on:mousemove=on_drag
            on:mouseup=move |_| dragging.set(false)
            on:mouseleave=move |_| dragging.set(false)
        >
            <div class="task-page__pane" style=move || format!("width: {}%", task.with(|t| t.split))>
                <ModelVersionPicker catalog=catalog on_change=on_selection/>

                <label class="form-field">
                    <span class="form-field__label">"Agent"</span>
                    <select
                        class="form-field__select"
                        on:change=move |ev| {
                            let agent = event_target_value(&ev);
                            task.update(|t| t.draft.agent_id = agent);
                        }
                    >
                        <option value="">"-- Select Agent --"</option>
                        {move || {
                            let current = task.with(|t| t.draft.agent_id.clone());
                            task.with(|t| t.agents.clone())
                                .into_iter()
                                .map(|agent| {
                                    let selected = agent == current;
                                    view! { <option value=agent.clone() selected=selected>{agent.clone()}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>

                <Show when=move || catalog.with(|c| c.selection().is_some())>
                    <div class="form-field task-page__classes">
                        <span class="form-field__label">"Select Classes"</span>
                        <Show when=move || task.with(|t| t.loading_classes)>
                            <span class="form-field__hint">"Loading..."</span>
                        </Show>
                        <Show when=move || task.with(|t| !t.loading_classes && t.available_classes.is_empty())>
                            <span class="form-field__hint">"No classes found"</span>
                        </Show>
                        <div class="task-page__class-options">
                            {move || {
                                task.with(|t| t.available_classes.clone())
                                    .into_iter()
                                    .map(|class| {
                                        let checked = class.clone();
                                        let toggled = class.clone();
                                        view! {
                                            <label class="task-page__class-option">
                                                <input
                                                    type="checkbox"
                                                    prop:checked=move || task.with(|t| t.draft.classes.contains_key(&checked))
                                                    on:change=move |_| task.update(|t| t.toggle_class(&toggled))
                                                />
                                                <span>{class}</span>
                                            </label>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </div>
                </Show>

                <Show when=move || task.with(|t| !t.draft.classes.is_empty())>
                    <div class="task-page__limits">
                        <h4>"Selected Classes with Limits"</h4>
                        {move || {
                            task.with(|t| t.draft.classes.iter().map(|(c, l)| (c.clone(), *l)).collect::<Vec<_>>())
                                .into_iter()
                                .map(|(class, limits)| {
                                    let lower_class = class.clone();
                                    let upper_class = class.clone();
                                    view! {
                                        <div class="task-page__limit-row">
                                            <strong>{class}</strong>
                                            <label>
                                                "Lower Limit: "
                                                <input
                                                    class="task-page__limit-input"
                                                    type="number"
                                                    min="0"
                                                    max=limits.upper().to_string()
                                                    step="0.01"
                                                    prop:value=limits.lower().to_string()
                                                    on:change=move |ev| {
                                                        if let Ok(value) = event_target_value(&ev).trim().parse::<f64>() {
                                                            task.update(|t| t.set_lower(&lower_class, value));
                                                        }
                                                    }
                                                />
                                            </label>
                                            <label>
                                                "Upper Limit: "
                                                <input
                                                    class="task-page__limit-input"
                                                    type="number"
                                                    min=limits.lower().to_string()
                                                    max="1"
                                                    step="0.01"
                                                    prop:value=limits.upper().to_string()
                                                    on:change=move |ev| {
                                                        if let Ok(value) = event_target_value(&ev).trim().parse::<f64>() {
                                                            task.update(|t| t.set_upper(&upper_class, value));
                                                        }
                                                    }
                                                />
                                            </label>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>

                <label class="form-field">
                    <span class="form-field__label">"Folder Name"</span>
                    <input
                        class="form-field__input"
                        type="text"
                        prop:value=move || task.with(|t| t.draft.folder_name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            task.update(|t| t.draft.folder_name = value);
                        }
                    />
                </label>

                <div class="task-page__sizes">
                    {size_input("Max Size", |t, v| t.draft.maxsize = v)}
                    {size_input("Min Size", |t, v| t.draft.minsize = v)}
                    {size_input("Size", |t, v| t.draft.size = v)}
                </div>

                {draft_list(DraftList::Prompts, "Prompts", "Enter prompt", "Add Prompt")}
                {draft_list(DraftList::Urls, "URLs", "Enter url", "Add Url")}

                <label class="form-field">
                    <span class="form-field__label">"Submitter Email"</span>
                    <input
                        class="form-field__input"
                        type="email"
                        prop:value=move || task.with(|t| t.draft.submitter_email.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            task.update(|t| t.draft.submitter_email = value);
                        }
                    />
                </label>
                <label class="form-field">
                    <span class="form-field__label">"Submitter Phone Number"</span>
                    <input
                        class="form-field__input"
                        type="tel"
                        prop:value=move || task.with(|t| t.draft.submitter_phone_number.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            task.update(|t| t.draft.submitter_phone_number = value);
                        }
                    />
                </label>

                <button
                    class="btn btn--primary"
                    disabled=move || task.with(|t| t.submitting)
                    on:click=on_submit
                >
                    {move || if task.with(|t| t.submitting) { "Submitting..." } else { "Submit" }}
                </button>
            </div>

            <div
                class="task-page__resizer"
                role="separator"
                tabindex="0"
                aria-label="Resize tabs"
                on:mousedown=move |ev: leptos::ev::MouseEvent| {
                    ev.prevent_default();
                    dragging.set(true);
                }
            ></div>

            <div class="task-page__pane task-page__pane--right" style=move || format!("width: {}%", 100.0 - task.with(|t| t.split))>
                <div class="tabs">
                    {TaskTab::ALL
                        .into_iter()
                        .map(|tab| {
                            view! {
                                <button
                                    class="tabs__tab"
                                    class:tabs__tab--active=move || task.with(|t| t.tab == tab)
                                    on:click=move |_| task.update(|t| t.tab = tab)
                                >
                                    {tab.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="tabs__content">
                    {move || match task.with(|t| t.tab) {
                        TaskTab::Collectors => view! { <CollectorsTab task=task/> }.into_any(),
                        TaskTab::Tester => view! {
                            <div class="tab-content">
                                <h3>"Tester"</h3>
                            </div>
                        }
                        .into_any(),
                        TaskTab::Reproducers => view! {
                            <div class="tab-content">
                                <h3>"Reproducers"</h3>
                            </div>
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}

/// Agent details and the last task the backend accepted.
#[component]
fn CollectorsTab(task: RwSignal<TaskState>) -> impl IntoView {
    let agent = move || task.with(|t| t.draft.agent_id.clone());
    let reply = move || task.with(|t| t.reply.clone());

    view! {
        <div class="tab-content">
            <h3>"Collectors"</h3>
            <Show when=move || !agent().is_empty()>
                <div class="task-details">
                    <h4>"Agent ID: " {agent}</h4>
                </div>
            </Show>
            {move || {
                reply()
                    .map(|reply| {
                        let message = reply.message.unwrap_or_default();
                        let record = reply.task;
                        view! {
                            <div class="task-details">
                                <h3>"Task Details"</h3>
                                <p><strong>"Message: "</strong>{message}</p>
                                {record.map(|t| view! { <TaskRecordView record=t/> })}
                            </div>
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn TaskRecordView(record: TaskRecord) -> impl IntoView {
    let status_class = format!("status status--{}", record.status_class());
    let classes = record
        .class_type
        .iter()
        .map(|(name, limits)| {
            let text = limits_text(limits);
            view! { <li><strong>{name.clone()}": "</strong>{text}</li> }
        })
        .collect_view();
    let prompts = record
        .prompt
        .iter()
        .map(|p| view! { <li>{p.clone()}</li> })
        .collect_view();
    let urls_empty = record.url.is_empty();
    let urls = record
        .url
        .iter()
        .map(|u| view! { <li>{u.clone()}</li> })
        .collect_view();

    view! {
        <div class="task-record">
            <p><strong>"ID: "</strong>{record.id}</p>
            <p><strong>"Agent ID: "</strong>{record.agent_id}</p>
            <p><strong>"Class Type:"</strong></p>
            <ul class="task-record__classes">{classes}</ul>
            <p><strong>"Folder Name: "</strong>{record.folder_name}</p>
            <p><strong>"Max Size: "</strong>{record.maxsize}</p>
            <p><strong>"Min Size: "</strong>{record.minsize}</p>
            <p><strong>"Model: "</strong>{record.model}</p>
            <p><strong>"Progress: "</strong>{record.progress}</p>
            <p><strong>"Prompt:"</strong></p>
            <ul class="task-record__prompts">{prompts}</ul>
            <p><strong>"Size: "</strong>{record.size}</p>
            <p>
                <strong>"Status: "</strong>
                <span class=status_class>{record.status}</span>
            </p>
            <p><strong>"Submitter Email: "</strong>{record.submitter_email}</p>
            <p><strong>"Submitter Phone Number: "</strong>{record.submitter_phone_number}</p>
            <p><strong>"URL:"</strong></p>
            {if urls_empty {
                view! { <span>"No URLs provided."</span> }.into_any()
            } else {
                view! { <ul class="task-record__urls">{urls}</ul> }.into_any()
            }}
            <p><strong>"Version: "</strong>{record.version}</p>
        </div>
    }
}
