use shared::Credentials;
use yew::prelude::*;

use super::forms::credentials_form::CredentialsForm;
use crate::hooks::use_auth::AuthForm;

#[derive(Properties, PartialEq)]
pub struct AuthViewProps {
    pub form: AuthForm,
    pub submitting: bool,
    pub on_login: Callback<Credentials>,
    pub on_register: Callback<Credentials>,
    pub on_show_form: Callback<AuthForm>,
}

/// Logged-out screen: either the login or the register form
#[function_component(AuthView)]
pub fn auth_view(props: &AuthViewProps) -> Html {
    let show = |target: AuthForm| {
        let on_show_form = props.on_show_form.clone();
        Callback::from(move |_: ()| on_show_form.emit(target))
    };

    html! {
        <main class="auth-view">
            <h1 class="auth-title">{"💊 MedTrack"}</h1>
            {match props.form {
                AuthForm::Login => html! {
                    <CredentialsForm
                        key="login"
                        title="Login"
                        submit_label="Login"
                        id_prefix="login"
                        submitting={props.submitting}
                        on_submit={props.on_login.clone()}
                        switch_prompt="Don't have an account?"
                        switch_label="Register"
                        on_switch={show(AuthForm::Register)}
                    />
                },
                AuthForm::Register => html! {
                    <CredentialsForm
                        key="register"
                        title="Register"
                        submit_label="Create account"
                        id_prefix="register"
                        submitting={props.submitting}
                        on_submit={props.on_register.clone()}
                        switch_prompt="Already have an account?"
                        switch_label="Login"
                        on_switch={show(AuthForm::Login)}
                    />
                },
            }}
        </main>
    }
}
