//! Parent-window discovery for the broker's interactive UI.
//!
//! The adapter never creates UI of its own; it only locates a host surface for the
//! broker to anchor its account picker and consent dialogs to. The windowing
//! primitives themselves are platform property, consumed through [`WindowLocator`] so
//! tests and non-interactive hosts can substitute fixed handles.

// self
use crate::_prelude::*;

/// Raw platform window handle (`HWND`-shaped).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub isize);
impl Display for WindowHandle {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "WindowHandle({:#x})", self.0)
	}
}

/// Capability for locating host windows to anchor broker UI on.
pub trait WindowLocator
where
	Self: Send + Sync,
{
	/// Window of the hosting console, when the process has one.
	fn console_window(&self) -> Option<WindowHandle>;

	/// The desktop window; always resolvable on the platform.
	fn desktop_window(&self) -> WindowHandle;
}

/// Locator returning fixed handles, for embedding hosts and tests.
#[derive(Clone, Copy, Debug)]
pub struct StaticWindows {
	/// Console handle to report, if any.
	pub console: Option<WindowHandle>,
	/// Desktop handle to report.
	pub desktop: WindowHandle,
}
impl WindowLocator for StaticWindows {
	fn console_window(&self) -> Option<WindowHandle> {
		self.console
	}

	fn desktop_window(&self) -> WindowHandle {
		self.desktop
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn static_windows_report_fixed_handles() {
		let windows = StaticWindows { console: Some(WindowHandle(0xC0)), desktop: WindowHandle(1) };

		assert_eq!(windows.console_window(), Some(WindowHandle(0xC0)));
		assert_eq!(windows.desktop_window(), WindowHandle(1));
	}
}
