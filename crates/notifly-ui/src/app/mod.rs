use notifly_api_models::{CategoryTypeRequest, SendNotificationRequest};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::components::categories::CategoryManager;
use crate::components::compose::ComposeForm;
use crate::components::templates::TemplateTable;
use crate::components::toast::{Toast, ToastHost};
use crate::core::cache::CategoryCache;
use crate::core::notify::{ApiFailure, Notifier};
use crate::core::store::AppStore;
use crate::services::{ApiClient, LocalStore, load_app_language, load_auth_token};

#[allow(clippy::cast_possible_truncation)]
fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

fn notify(
    notifier: &Rc<RefCell<Notifier>>,
    toasts: &UseStateHandle<Vec<Toast>>,
    next_toast_id: &UseStateHandle<u64>,
    failure: &ApiFailure,
    context: &str,
) {
    let notification = notifier.borrow_mut().translate(failure, context, now_ms());
    if notification.visible {
        let id = **next_toast_id;
        next_toast_id.set(id + 1);
        let mut list = (**toasts).clone();
        list.push(Toast {
            id,
            message: notification.message,
        });
        toasts.set(list);
    }
}

#[function_component(NotiflyApp)]
fn notifly_app() -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let api = use_memo(
        |_| ApiClient::new(String::new()).with_auth_token(load_auth_token()),
        (),
    );
    let notifier = use_mut_ref(Notifier::new);
    let cache = use_mut_ref(|| CategoryCache::new(LocalStore));
    let toasts = use_state(Vec::<Toast>::new);
    let next_toast_id = use_state(|| 0_u64);
    let categories = use_state(Vec::new);
    let send_busy = use_state(|| false);
    let category_busy = use_state(|| false);
    let first_load = use_state(|| true);

    let templates = use_selector(|store: &AppStore| store.templates.clone());
    let templates = (*templates).clone();
    let language = load_app_language();

    let fetch_page = {
        let dispatch = dispatch.clone();
        let api = api.clone();
        let notifier = notifier.clone();
        let toasts = toasts.clone();
        let next_toast_id = next_toast_id.clone();
        let first_load = first_load.clone();
        Callback::from(move |page: u32| {
            let dispatch = dispatch.clone();
            let api = (*api).clone();
            let notifier = notifier.clone();
            let toasts = toasts.clone();
            let next_toast_id = next_toast_id.clone();
            let is_new_user = *first_load;
            first_load.set(false);
            let mut token = 0;
            dispatch.reduce_mut(|store| token = store.templates.begin_fetch());
            spawn_local(async move {
                match api.templates(page, 10, None, None, true).await {
                    Ok(result) => {
                        let welcome = is_new_user && result.meta.total_count == 0;
                        dispatch.reduce_mut(|store| {
                            store.templates.apply_page(token, result.items, result.meta, welcome);
                        });
                    }
                    Err(failure) => {
                        dispatch.reduce_mut(|store| store.templates.fail_fetch(token));
                        notify(&notifier, &toasts, &next_toast_id, &failure, "load templates");
                    }
                }
            });
        })
    };

    {
        let fetch_page = fetch_page.clone();
        let api = api.clone();
        let cache = cache.clone();
        let categories = categories.clone();
        let notifier = notifier.clone();
        let toasts = toasts.clone();
        let next_toast_id = next_toast_id.clone();
        use_effect_with_deps(
            move |_: &()| {
                fetch_page.emit(1);
                let api = (*api).clone();
                spawn_local(async move {
                    let mut cache = cache.borrow_mut();
                    match api.category_types(&mut cache, false, now_ms()).await {
                        Ok(items) => categories.set(items),
                        Err(failure) => {
                            notify(
                                &notifier,
                                &toasts,
                                &next_toast_id,
                                &failure,
                                "load category types",
                            );
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let on_toggle_row = {
        let dispatch = dispatch.clone();
        Callback::from(move |index: usize| {
            dispatch.reduce_mut(|store| store.templates.selection.toggle_row(index));
        })
    };
    let on_toggle_all = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            dispatch.reduce_mut(|store| {
                let len = store.templates.items.len();
                store.templates.selection.toggle_all(len);
            });
        })
    };

    let on_create_category = {
        let api = api.clone();
        let cache = cache.clone();
        let categories = categories.clone();
        let notifier = notifier.clone();
        let toasts = toasts.clone();
        let next_toast_id = next_toast_id.clone();
        let category_busy = category_busy.clone();
        Callback::from(move |name: String| {
            let api = (*api).clone();
            let cache = cache.clone();
            let categories = categories.clone();
            let notifier = notifier.clone();
            let toasts = toasts.clone();
            let next_toast_id = next_toast_id.clone();
            let category_busy = category_busy.clone();
            category_busy.set(true);
            spawn_local(async move {
                let request = CategoryTypeRequest {
                    name,
                    description: None,
                };
                let mut cache = cache.borrow_mut();
                match api.create_category_type(&mut cache, &request, now_ms()).await {
                    Ok(_) => {
                        if let Some(items) = cache.load(now_ms()) {
                            categories.set(items);
                        }
                    }
                    Err(failure) => notify(
                        &notifier,
                        &toasts,
                        &next_toast_id,
                        &failure,
                        "create category type",
                    ),
                }
                category_busy.set(false);
            });
        })
    };
    let on_rename_category = {
        let api = api.clone();
        let cache = cache.clone();
        let categories = categories.clone();
        let notifier = notifier.clone();
        let toasts = toasts.clone();
        let next_toast_id = next_toast_id.clone();
        let category_busy = category_busy.clone();
        Callback::from(move |(id, name): (Uuid, String)| {
            let api = (*api).clone();
            let cache = cache.clone();
            let categories = categories.clone();
            let notifier = notifier.clone();
            let toasts = toasts.clone();
            let next_toast_id = next_toast_id.clone();
            let category_busy = category_busy.clone();
            let description = categories
                .iter()
                .find(|item| item.id == id)
                .and_then(|item| item.description.clone());
            category_busy.set(true);
            spawn_local(async move {
                let request = CategoryTypeRequest { name, description };
                let mut cache = cache.borrow_mut();
                match api
                    .update_category_type(&mut cache, id, &request, now_ms())
                    .await
                {
                    Ok(_) => {
                        if let Some(items) = cache.load(now_ms()) {
                            categories.set(items);
                        }
                    }
                    Err(failure) => notify(
                        &notifier,
                        &toasts,
                        &next_toast_id,
                        &failure,
                        "rename category type",
                    ),
                }
                category_busy.set(false);
            });
        })
    };
    let on_delete_category = {
        let api = api.clone();
        let cache = cache.clone();
        let categories = categories.clone();
        let notifier = notifier.clone();
        let toasts = toasts.clone();
        let next_toast_id = next_toast_id.clone();
        let category_busy = category_busy.clone();
        Callback::from(move |id: Uuid| {
            let api = (*api).clone();
            let cache = cache.clone();
            let categories = categories.clone();
            let notifier = notifier.clone();
            let toasts = toasts.clone();
            let next_toast_id = next_toast_id.clone();
            let category_busy = category_busy.clone();
            category_busy.set(true);
            spawn_local(async move {
                let mut cache = cache.borrow_mut();
                match api.delete_category_type(&mut cache, id, now_ms()).await {
                    Ok(()) => {
                        if let Some(items) = cache.load(now_ms()) {
                            categories.set(items);
                        }
                    }
                    Err(failure) => notify(
                        &notifier,
                        &toasts,
                        &next_toast_id,
                        &failure,
                        "delete category type",
                    ),
                }
                category_busy.set(false);
            });
        })
    };

    let on_send = {
        let api = api.clone();
        let notifier = notifier.clone();
        let toasts = toasts.clone();
        let next_toast_id = next_toast_id.clone();
        let send_busy = send_busy.clone();
        Callback::from(move |request: SendNotificationRequest| {
            let api = (*api).clone();
            let notifier = notifier.clone();
            let toasts = toasts.clone();
            let next_toast_id = next_toast_id.clone();
            let send_busy = send_busy.clone();
            send_busy.set(true);
            spawn_local(async move {
                if let Err(failure) = api.send_notification(&request).await {
                    notify(
                        &notifier,
                        &toasts,
                        &next_toast_id,
                        &failure,
                        "send notification",
                    );
                }
                send_busy.set(false);
            });
        })
    };

    let on_dismiss = {
        let toasts = toasts.clone();
        Callback::from(move |id: u64| {
            let list: Vec<Toast> = (*toasts)
                .iter()
                .filter(|toast| toast.id != id)
                .cloned()
                .collect();
            toasts.set(list);
        })
    };

    let meta = templates.meta.clone();
    html! {
        <main class="notifly" lang={language}>
            <h1>{"Notifly"}</h1>
            <CategoryManager
                categories={(*categories).clone()}
                busy={*category_busy}
                on_create={on_create_category}
                on_rename={on_rename_category}
                on_delete={on_delete_category}
            />
            <ComposeForm
                categories={(*categories).clone()}
                busy={*send_busy}
                on_send={on_send}
            />
            <TemplateTable
                items={templates.items.clone()}
                selection={templates.selection.clone()}
                message={templates.message.clone()}
                page={meta.as_ref().map_or(1, |m| m.page)}
                page_count={meta.as_ref().map_or(0, |m| m.page_count)}
                has_previous_page={meta.as_ref().is_some_and(|m| m.has_previous_page)}
                has_next_page={meta.as_ref().is_some_and(|m| m.has_next_page)}
                loading={templates.loading}
                on_toggle_row={on_toggle_row}
                on_toggle_all={on_toggle_all}
                on_page={fetch_page}
            />
            <ToastHost toasts={(*toasts).clone()} on_dismiss={on_dismiss} />
        </main>
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<NotiflyApp>::with_root(root).render();
    } else {
        yew::Renderer::<NotiflyApp>::new().render();
    }
}
