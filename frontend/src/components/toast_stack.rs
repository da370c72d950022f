use uuid::Uuid;
use yew::prelude::*;

use crate::hooks::use_toasts::Toast;

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<Uuid>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-container" aria-live="polite">
            {for props.toasts.iter().map(|toast| {
                let on_click = {
                    let on_dismiss = props.on_dismiss.clone();
                    let id = toast.id;
                    Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
                };
                html! {
                    <div key={toast.id.to_string()} class={classes!("toast", toast.notice.level.css_class())} onclick={on_click}>
                        {&toast.notice.message}
                    </div>
                }
            })}
        </div>
    }
}
