use notifly_api_models::{CategoryType, SendNotificationRequest};
use uuid::Uuid;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::input_value;
use crate::core::time::{
    current_date_string, current_time_string, validate_schedule_date, validate_schedule_time,
};

#[derive(Properties, PartialEq)]
pub(crate) struct ComposeFormProps {
    pub categories: Vec<CategoryType>,
    pub busy: bool,
    pub on_send: Callback<SendNotificationRequest>,
}

#[function_component(ComposeForm)]
pub(crate) fn compose_form(props: &ComposeFormProps) -> Html {
    let now = chrono::Utc::now();
    let title = use_state(String::new);
    let body = use_state(String::new);
    let category = use_state(|| None::<Uuid>);
    let scheduled = use_state(|| false);
    let date = use_state(|| current_date_string(now));
    let time = use_state(|| current_time_string(now));
    let error = use_state(|| None::<String>);

    let on_title = {
        let title = title.clone();
        Callback::from(move |event: Event| title.set(input_value(&event)))
    };
    let on_body = {
        let body = body.clone();
        Callback::from(move |event: Event| body.set(input_value(&event)))
    };
    let on_date = {
        let date = date.clone();
        Callback::from(move |event: Event| date.set(input_value(&event)))
    };
    let on_time = {
        let time = time.clone();
        Callback::from(move |event: Event| time.set(input_value(&event)))
    };
    let on_scheduled = {
        let scheduled = scheduled.clone();
        Callback::from(move |event: Event| {
            let checked = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                .is_some_and(|input| input.checked());
            scheduled.set(checked);
        })
    };
    let on_category = {
        let category = category.clone();
        Callback::from(move |event: Event| {
            let value = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
                .map(|select| select.value())
                .unwrap_or_default();
            category.set(Uuid::parse_str(&value).ok());
        })
    };

    let on_submit = {
        let title = title.clone();
        let body = body.clone();
        let category = category.clone();
        let scheduled = scheduled.clone();
        let date = date.clone();
        let time = time.clone();
        let error = error.clone();
        let on_send = props.on_send.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if title.trim().is_empty() || body.trim().is_empty() {
                error.set(Some("Title and message are both required.".to_string()));
                return;
            }
            let (schedule_date, schedule_time) = if *scheduled {
                let now = chrono::Utc::now();
                if let Err(reason) = validate_schedule_date(&date, now) {
                    error.set(Some(reason));
                    return;
                }
                if let Err(reason) = validate_schedule_time(&time) {
                    error.set(Some(reason));
                    return;
                }
                (Some((*date).clone()), Some((*time).clone()))
            } else {
                (None, None)
            };
            error.set(None);
            on_send.emit(SendNotificationRequest {
                title: title.trim().to_string(),
                body: body.trim().to_string(),
                category_type_id: *category,
                schedule_date,
                schedule_time,
                recipients: Vec::new(),
            });
        })
    };

    html! {
        <form class="compose" onsubmit={on_submit}>
            <label>{"Title"}
                <input type="text" value={(*title).clone()} onchange={on_title} />
            </label>
            <label>{"Message"}
                <input type="text" value={(*body).clone()} onchange={on_body} />
            </label>
            <label>{"Category"}
                <select onchange={on_category}>
                    <option value="" selected={category.is_none()}>{"None"}</option>
                    {for props.categories.iter().map(|item| html! {
                        <option
                            value={item.id.to_string()}
                            selected={*category == Some(item.id)}
                        >
                            {item.name.clone()}
                        </option>
                    })}
                </select>
            </label>
            <label>{"Schedule for later"}
                <input type="checkbox" checked={*scheduled} onchange={on_scheduled} />
            </label>
            if *scheduled {
                <label>{"Date (M/d/yyyy)"}
                    <input type="text" value={(*date).clone()} onchange={on_date} />
                </label>
                <label>{"Time (H:mm)"}
                    <input type="text" value={(*time).clone()} onchange={on_time} />
                </label>
            }
            if let Some(reason) = (*error).clone() {
                <p class="field-error">{reason}</p>
            }
            <button type="submit" disabled={props.busy}>
                {if *scheduled { "Schedule" } else { "Send now" }}
            </button>
        </form>
    }
}
