use shared::ConnectionStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConnectionStatusBadgeProps {
    pub status: ConnectionStatus,
}

#[function_component(ConnectionStatusBadge)]
pub fn connection_status_badge(props: &ConnectionStatusBadgeProps) -> Html {
    html! {
        <span class={classes!("connection-status", props.status.css_class())} title={props.status.label()}>
            <span class="status-dot"></span>
            {props.status.label()}
        </span>
    }
}
