use fltk::{enums::Color, menu::MenuBar, prelude::*, window::Window};

use crate::app::domain::settings::Theme;

/// Colors used by every themed widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub window: Color,
    pub panel: Color,
    pub header: Color,
    pub text: Color,
    pub muted: Color,
    pub editor_bg: Color,
    pub editor_fg: Color,
    pub cursor: Color,
    pub selection: Color,
    pub linenumber_bg: Color,
    pub linenumber_fg: Color,
    pub menu_bg: Color,
    pub menu_fg: Color,
    pub menu_hover: Color,
    pub button: Color,
    pub button_fg: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            window: Color::from_rgb(31, 41, 55),
            panel: Color::from_rgb(17, 24, 39),
            header: Color::from_rgb(31, 41, 55),
            text: Color::from_rgb(243, 244, 246),
            muted: Color::from_rgb(156, 163, 175),
            editor_bg: Color::from_rgb(30, 30, 30),
            editor_fg: Color::from_rgb(220, 220, 220),
            cursor: Color::from_rgb(255, 255, 255),
            selection: Color::from_rgb(70, 70, 100),
            linenumber_bg: Color::from_rgb(40, 40, 40),
            linenumber_fg: Color::from_rgb(150, 150, 150),
            menu_bg: Color::from_rgb(35, 35, 35),
            menu_fg: Color::from_rgb(220, 220, 220),
            menu_hover: Color::from_rgb(60, 60, 60),
            button: Color::from_rgb(55, 65, 81),
            button_fg: Color::from_rgb(243, 244, 246),
        },
        Theme::Light => Palette {
            window: Color::from_rgb(243, 244, 246),
            panel: Color::White,
            header: Color::from_rgb(240, 240, 240),
            text: Color::from_rgb(31, 41, 55),
            muted: Color::from_rgb(75, 85, 99),
            editor_bg: Color::White,
            editor_fg: Color::Black,
            cursor: Color::Black,
            selection: Color::from_rgb(173, 216, 230),
            linenumber_bg: Color::from_rgb(240, 240, 240),
            linenumber_fg: Color::from_rgb(100, 100, 100),
            menu_bg: Color::from_rgb(240, 240, 240),
            menu_fg: Color::Black,
            menu_hover: Color::from_rgb(200, 200, 200),
            button: Color::from_rgb(229, 231, 235),
            button_fg: Color::from_rgb(31, 41, 55),
        },
    }
}

/// Accent colors of the toolbar actions. They keep their hue in both themes.
pub mod accent {
    use fltk::enums::Color;

    pub const RUN: Color = Color::from_rgb(34, 197, 94);
    pub const SAVE: Color = Color::from_rgb(59, 130, 246);
    pub const LOAD: Color = Color::from_rgb(168, 85, 247);
    pub const EXPORT: Color = Color::from_rgb(99, 102, 241);
    pub const RESET: Color = Color::from_rgb(239, 68, 68);
    pub const ACTIVE: Color = Color::from_rgb(22, 163, 74);
}

/// Recolor the window and the menu bar. Panels recolor themselves.
pub fn apply_theme(window: &mut Window, menu: &mut MenuBar, theme: Theme) {
    let p = palette(theme);
    window.set_color(p.window);
    window.set_label_color(p.text);
    menu.set_color(p.menu_bg);
    menu.set_text_color(p.menu_fg);
    menu.set_selection_color(p.menu_hover);

    window.redraw();
    menu.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);

        let on: i32 = if is_dark { 1 } else { 0 };

        // DWMWA_USE_IMMERSIVE_DARK_MODE (Windows 11 / Windows 10 2004+)
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(20),
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );

        // Windows 10 1809-1903
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(19),
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ_per_theme() {
        let dark = palette(Theme::Dark);
        let light = palette(Theme::Light);
        assert_ne!(dark.editor_bg, light.editor_bg);
        assert_ne!(dark.text, light.text);
        assert_ne!(dark.panel, light.panel);
    }

    #[test]
    fn test_text_differs_from_background() {
        for theme in [Theme::Dark, Theme::Light] {
            let p = palette(theme);
            assert_ne!(p.text, p.window);
            assert_ne!(p.editor_fg, p.editor_bg);
            assert_ne!(p.menu_fg, p.menu_bg);
        }
    }
}
