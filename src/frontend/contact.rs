use super::icons::{self, Icon};
use crate::content::{ContactDetail, ContactField, ContactKind};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ContactPanelProps {
    pub details: &'static [ContactDetail],
    pub relay_url: AttrValue,
}

/// Static contact details plus a form the browser posts straight to the relay.
#[function_component(ContactPanel)]
pub fn contact_panel(props: &ContactPanelProps) -> Html {
    html! {
        <>
            <div class="contact-info">
                { for props.details.iter().map(|detail| html! {
                    <p>
                        { icons::svg(contact_icon(detail.kind)) }
                        {detail.text}
                    </p>
                }) }
            </div>
            <form class="contact-form" action={props.relay_url.clone()} method="POST">
                { for ContactField::ALL.into_iter().map(form_field) }
                <button type="submit" class="contact-submit">{"Send message"}</button>
            </form>
        </>
    }
}

fn contact_icon(kind: ContactKind) -> Icon {
    match kind {
        ContactKind::Email => Icon::Mail,
        ContactKind::Location => Icon::Pin,
        ContactKind::Phone => Icon::Phone,
    }
}

fn form_field(field: ContactField) -> Html {
    let id = format!("contact-{}", field.name());

    let control = match field.input_type() {
        Some(kind) => html! {
            <input
                id={id}
                name={field.name()}
                type={kind}
                autocomplete={field.autocomplete()}
                required=true
            />
        },
        None => html! {
            <textarea id={id} name={field.name()} rows="5" required=true />
        },
    };

    html! {
        <label class="contact-field">
            <span>{field.label()}</span>
            {control}
        </label>
    }
}
