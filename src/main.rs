use leptos::prelude::*;
use viz_adapters::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(|| view! { <App /> })
}
