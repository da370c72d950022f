use shared::Credentials;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CredentialsFormProps {
    pub title: AttrValue,
    pub submit_label: AttrValue,
    /// Prefix for input ids so login and register fields stay distinct
    pub id_prefix: AttrValue,
    pub submitting: bool,
    pub on_submit: Callback<Credentials>,

    pub switch_prompt: AttrValue,
    pub switch_label: AttrValue,
    pub on_switch: Callback<()>,
}

#[function_component(CredentialsForm)]
pub fn credentials_form(props: &CredentialsFormProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let onsubmit = {
        let username = username.clone();
        let password = password.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = username.trim().to_string();
            if name.is_empty() || password.is_empty() {
                return;
            }
            on_submit.emit(Credentials {
                username: name,
                password: (*password).clone(),
            });
        })
    };

    let on_switch_click = {
        let on_switch = props.on_switch.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_switch.emit(());
        })
    };

    let username_id = format!("{}Username", props.id_prefix);
    let password_id = format!("{}Password", props.id_prefix);

    html! {
        <div class="auth-card">
            <h2>{&props.title}</h2>
            <form class="auth-form" {onsubmit}>
                <div class="form-group">
                    <label for={username_id.clone()}>{"Username"}</label>
                    <input
                        type="text"
                        id={username_id}
                        autocomplete="username"
                        value={(*username).clone()}
                        oninput={on_username_input}
                        disabled={props.submitting}
                        required=true
                    />
                </div>
                <div class="form-group">
                    <label for={password_id.clone()}>{"Password"}</label>
                    <input
                        type="password"
                        id={password_id}
                        value={(*password).clone()}
                        oninput={on_password_input}
                        disabled={props.submitting}
                        required=true
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled={props.submitting}>
                    {&props.submit_label}
                </button>
            </form>
            <p class="auth-switch">
                {&props.switch_prompt}{" "}
                <a href="#" onclick={on_switch_click}>{&props.switch_label}</a>
            </p>
        </div>
    }
}
