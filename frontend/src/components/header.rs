use shared::ConnectionStatus;
use yew::prelude::*;

use super::connection_status::ConnectionStatusBadge;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub username: String,
    pub connection: ConnectionStatus,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_logout_click = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"💊 MedTrack"}</h1>
                <div class="header-right">
                    <ConnectionStatusBadge status={props.connection.clone()} />
                    <span class="header-user">{format!("Welcome, {}", props.username)}</span>
                    <button type="button" class="btn btn-secondary" onclick={on_logout_click}>
                        {"Logout"}
                    </button>
                </div>
            </div>
        </header>
    }
}
