use leptos::prelude::*;

/// Colour scheme of a `Button`.
#[derive(Clone, Copy)]
pub enum ButtonTone {
    Create,
    Update,
    Neutral,
}

impl ButtonTone {
    fn class(self) -> &'static str {
        match self {
            ButtonTone::Create => {
                "text-white bg-purple-500 hover:bg-purple-600 focus:ring-4 focus:outline-none focus:ring-purple-300 font-medium rounded-md text-sm px-4 py-2 text-center"
            }
            ButtonTone::Update => {
                "text-white bg-emerald-600 hover:bg-emerald-700 focus:ring-4 focus:outline-none focus:ring-emerald-300 font-medium rounded-md text-sm px-4 py-2 text-center"
            }
            ButtonTone::Neutral => {
                "text-gray-700 bg-white border border-gray-300 hover:bg-gray-50 focus:ring-4 focus:outline-none focus:ring-gray-100 font-medium rounded-md text-sm px-4 py-2 text-center"
            }
        }
    }
}

#[component]
pub fn Button(
    #[prop(optional)] button_type: Option<&'static str>,
    #[prop(optional, into, default = Signal::from(ButtonTone::Create))] tone: Signal<ButtonTone>,
    #[prop(optional)] on_click: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let button_type = button_type.unwrap_or("button");

    view! {
        <button
            type=button_type
            class=move || tone.get().class()
            on:click=move |_| {
                if let Some(callback) = on_click {
                    callback.run(());
                }
            }
        >
            {children()}
        </button>
    }
}
