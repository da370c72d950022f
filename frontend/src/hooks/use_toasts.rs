use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::Notice;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub notice: Notice,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(Uuid),
}

/// Newest first, like the alert stack it replaces
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastList {
    pub toasts: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.insert(0, toast),
            ToastAction::Dismiss(id) => toasts.retain(|toast| toast.id != id),
        }
        Rc::new(ToastList { toasts })
    }
}

pub struct UseToastsResult {
    pub toasts: Vec<Toast>,
    pub push: Callback<Notice>,
    pub dismiss: Callback<Uuid>,
}

#[hook]
pub fn use_toasts(duration_ms: u32) -> UseToastsResult {
    let list = use_reducer(ToastList::default);

    let dismiss = {
        let dispatcher = list.dispatcher();
        use_callback((), move |id: Uuid, _| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    let push = {
        let dispatcher = list.dispatcher();
        use_callback(duration_ms, move |notice: Notice, duration_ms| {
            let id = Uuid::new_v4();
            dispatcher.dispatch(ToastAction::Push(Toast { id, notice }));

            let dispatcher = dispatcher.clone();
            let duration_ms = *duration_ms;
            spawn_local(async move {
                TimeoutFuture::new(duration_ms).await;
                dispatcher.dispatch(ToastAction::Dismiss(id));
            });
        })
    };

    UseToastsResult {
        toasts: list.toasts.clone(),
        push,
        dismiss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_reducer_orders_newest_first_and_dismisses() {
        let first = Toast { id: Uuid::new_v4(), notice: Notice::success("one") };
        let second = Toast { id: Uuid::new_v4(), notice: Notice::error("two") };

        let list = Rc::new(ToastList::default())
            .reduce(ToastAction::Push(first.clone()))
            .reduce(ToastAction::Push(second.clone()));
        assert_eq!(list.toasts, vec![second.clone(), first.clone()]);

        let list = list.reduce(ToastAction::Dismiss(second.id));
        assert_eq!(list.toasts, vec![first]);
    }
}
