use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

/// Backdrop and dialog frame; clicking outside the dialog closes it
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">{props.title.clone()}</h3>
                    {for props.children.iter()}
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalButtonsProps {
    pub submit_label: AttrValue,
    pub is_submitting: bool,
    pub on_cancel: Callback<()>,
}

#[function_component(ModalButtons)]
pub fn modal_buttons(props: &ModalButtonsProps) -> Html {
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <div class="modal-buttons">
            <button type="submit" class="btn btn-primary" disabled={props.is_submitting}>
                {if props.is_submitting { "Saving...".to_string() } else { props.submit_label.to_string() }}
            </button>
            <button
                type="button"
                class="btn btn-secondary"
                onclick={on_cancel}
                disabled={props.is_submitting}
            >
                {"Cancel"}
            </button>
        </div>
    }
}
