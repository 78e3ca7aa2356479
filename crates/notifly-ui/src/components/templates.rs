use notifly_api_models::Template;
use yew::prelude::*;

use crate::core::selection::SelectionState;
use crate::core::time::format_date_time;

#[derive(Properties, PartialEq)]
pub(crate) struct TemplateTableProps {
    pub items: Vec<Template>,
    pub selection: SelectionState,
    pub message: String,
    pub page: u32,
    pub page_count: u32,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub loading: bool,
    pub on_toggle_row: Callback<usize>,
    pub on_toggle_all: Callback<()>,
    pub on_page: Callback<u32>,
}

#[function_component(TemplateTable)]
pub(crate) fn template_table(props: &TemplateTableProps) -> Html {
    let row_count = props.items.len();
    let all_selected = props.selection.all_selected(row_count);
    let indeterminate = props.selection.indeterminate(row_count);

    let on_toggle_all = {
        let callback = props.on_toggle_all.clone();
        Callback::from(move |_| callback.emit(()))
    };
    let on_prev = {
        let callback = props.on_page.clone();
        let page = props.page;
        Callback::from(move |_| callback.emit(page.saturating_sub(1).max(1)))
    };
    let on_next = {
        let callback = props.on_page.clone();
        let page = props.page;
        Callback::from(move |_| callback.emit(page.saturating_add(1)))
    };

    html! {
        <section class="templates">
            <table>
                <thead>
                    <tr>
                        <th>
                            <input
                                type="checkbox"
                                checked={all_selected}
                                class={classes!(indeterminate.then_some("indeterminate"))}
                                onchange={on_toggle_all}
                            />
                        </th>
                        <th>{"Title"}</th>
                        <th>{"Language"}</th>
                        <th>{"Format"}</th>
                        <th>{"Updated"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.items.iter().enumerate().map(|(index, item)| {
                        let on_toggle = {
                            let callback = props.on_toggle_row.clone();
                            Callback::from(move |_| callback.emit(index))
                        };
                        html! {
                            <tr key={item.id.to_string()}>
                                <td>
                                    <input
                                        type="checkbox"
                                        checked={props.selection.is_selected(index)}
                                        onchange={on_toggle}
                                    />
                                </td>
                                <td>{item.title.clone()}</td>
                                <td>{format!("{:?}", item.language)}</td>
                                <td>{format!("{:?}", item.format)}</td>
                                <td>{format_date_time(item.updated_at)}</td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
            <footer class="pager">
                <button disabled={!props.has_previous_page || props.loading} onclick={on_prev}>
                    {"Previous"}
                </button>
                <span>{format!("Page {} of {}", props.page, props.page_count.max(1))}</span>
                <button disabled={!props.has_next_page || props.loading} onclick={on_next}>
                    {"Next"}
                </button>
            </footer>
            <p class="result-message">{props.message.clone()}</p>
        </section>
    }
}
