use gloo::timers::callback::Timeout;
use yew::prelude::*;

/// One transient message shown in the toast host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub(crate) id: u64,
    pub(crate) message: String,
}

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
}

#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |list: &Vec<Toast>| {
                let mut handles = Vec::new();
                for toast in list {
                    let on_dismiss = on_dismiss.clone();
                    let id = toast.id;
                    handles.push(Timeout::new(4000, move || on_dismiss.emit(id)));
                }
                move || drop(handles)
            },
            props.toasts.clone(),
        );
    }

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for props.toasts.iter().map(|toast| {
                let id = toast.id;
                let on_close = {
                    let on_dismiss = props.on_dismiss.clone();
                    Callback::from(move |_| on_dismiss.emit(id))
                };
                html! {
                    <div class="toast error" role="status">
                        <span>{toast.message.clone()}</span>
                        <button class="ghost" aria-label="Dismiss" onclick={on_close}>{"✕"}</button>
                    </div>
                }
            })}
        </div>
    }
}
