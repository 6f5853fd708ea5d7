use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error};
use wasm_bindgen::prelude::*;

use super::adapter::GraphAdapter;
use super::layout::LayoutEngine;
use crate::dom::DomHost;
use crate::error::VizError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Drive `adapter` from `requestAnimationFrame` until its layout stops.
pub fn run_animation<D, L>(adapter: Rc<RefCell<GraphAdapter<D, L>>>) -> Result<(), VizError>
where
	D: DomHost + 'static,
	D::Element: 'static,
	L: LayoutEngine + 'static,
{
	let window = web_sys::window().ok_or_else(|| VizError::MissingElement("window".into()))?;
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let animate_inner = animate.clone();

	*animate.borrow_mut() = Some(Closure::new(move || {
		let running = match adapter.borrow_mut().tick_frame() {
			Ok(running) => running,
			Err(err) => {
				error!("graph frame failed: {err}");
				false
			}
		};
		if !running {
			debug!("graph animation finished");
			return;
		}
		if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));

	if let Some(ref cb) = *animate.borrow() {
		window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map_err(VizError::dom)?;
	}
	Ok(())
}
