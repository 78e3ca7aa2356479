use notifly_api_models::CategoryType;
use uuid::Uuid;
use yew::prelude::*;

use crate::components::input_value;

#[derive(Properties, PartialEq)]
pub(crate) struct CategoryManagerProps {
    pub categories: Vec<CategoryType>,
    pub busy: bool,
    pub on_create: Callback<String>,
    pub on_rename: Callback<(Uuid, String)>,
    pub on_delete: Callback<Uuid>,
}

#[function_component(CategoryManager)]
pub(crate) fn category_manager(props: &CategoryManagerProps) -> Html {
    let draft = use_state(String::new);
    // Row currently being renamed, with its edited name.
    let editing = use_state(|| None::<(Uuid, String)>);

    let on_draft = {
        let draft = draft.clone();
        Callback::from(move |event: Event| draft.set(input_value(&event)))
    };
    let on_edit_name = {
        let editing = editing.clone();
        Callback::from(move |event: Event| {
            if let Some((id, _)) = *editing {
                editing.set(Some((id, input_value(&event))));
            }
        })
    };
    let on_submit = {
        let draft = draft.clone();
        let on_create = props.on_create.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let name = draft.trim().to_string();
            if !name.is_empty() {
                on_create.emit(name);
                draft.set(String::new());
            }
        })
    };
    let on_save = {
        let editing = editing.clone();
        let on_rename = props.on_rename.clone();
        Callback::from(move |_| {
            if let Some((id, name)) = (*editing).clone() {
                let name = name.trim().to_string();
                if !name.is_empty() {
                    on_rename.emit((id, name));
                }
                editing.set(None);
            }
        })
    };
    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };

    html! {
        <section class="categories">
            <h2>{"Category types"}</h2>
            <form onsubmit={on_submit}>
                <input
                    type="text"
                    placeholder="New category type"
                    value={(*draft).clone()}
                    onchange={on_draft}
                />
                <button type="submit" disabled={props.busy}>{"Add"}</button>
            </form>
            <ul>
                {for props.categories.iter().map(|item| {
                    let id = item.id;
                    let row = if editing.as_ref().is_some_and(|(edit_id, _)| *edit_id == id) {
                        let name = editing
                            .as_ref()
                            .map(|(_, name)| name.clone())
                            .unwrap_or_default();
                        html! {
                            <>
                                <input type="text" value={name} onchange={on_edit_name.clone()} />
                                <button onclick={on_save.clone()} disabled={props.busy}>
                                    {"Save"}
                                </button>
                                <button onclick={on_cancel.clone()}>{"Cancel"}</button>
                            </>
                        }
                    } else {
                        let on_start_edit = {
                            let editing = editing.clone();
                            let name = item.name.clone();
                            Callback::from(move |_| editing.set(Some((id, name.clone()))))
                        };
                        let on_remove = {
                            let on_delete = props.on_delete.clone();
                            Callback::from(move |_| on_delete.emit(id))
                        };
                        html! {
                            <>
                                <span>{item.name.clone()}</span>
                                <button onclick={on_start_edit}>{"Rename"}</button>
                                <button onclick={on_remove} disabled={props.busy}>
                                    {"Delete"}
                                </button>
                            </>
                        }
                    };
                    html! { <li key={id.to_string()}>{row}</li> }
                })}
            </ul>
        </section>
    }
}
