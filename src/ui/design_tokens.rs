// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Shared colors and measurements for the map chrome (controls, popups,
attribution) and for the canvas-drawn map content.

## Organization

- **Palette**: Base colors
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (4px grid)
- **Sizing**: Control and marker sizes
- **Typography**: Font size scale
- **Border**: Border width scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use iced_atlas::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

let backdrop = Color {
    a: opacity::OVERLAY_MEDIUM,
    ..palette::BLACK
};

let padding = spacing::SM;
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.2, 0.2, 0.2);
    pub const GRAY_700: Color = Color::from_rgb(0.33, 0.33, 0.33);
    pub const GRAY_400: Color = Color::from_rgb(0.6, 0.6, 0.6);
    pub const GRAY_200: Color = Color::from_rgb(0.8, 0.8, 0.8);
    pub const GRAY_100: Color = Color::from_rgb(0.96, 0.96, 0.96);

    /// Map background shown behind missing tiles.
    pub const MAP_BACKGROUND: Color = Color::from_rgb(0.867, 0.867, 0.867);

    /// Placeholder for tiles still loading.
    pub const TILE_LOADING: Color = Color::from_rgb(0.9, 0.9, 0.9);

    /// Marker pin body.
    pub const MARKER_BLUE: Color = Color::from_rgb(0.165, 0.506, 0.796);
    pub const MARKER_BLUE_DARK: Color = Color::from_rgb(0.192, 0.361, 0.545);

    /// Links and hovered control text.
    pub const LINK: Color = Color::from_rgb(0.0, 0.471, 0.659);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;

    /// Attribution strip background.
    pub const ATTRIBUTION: f32 = 0.8;
}

// ============================================================================
// Spacing Scale
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 2.0;
    pub const XS: f32 = 4.0;
    pub const SM: f32 = 6.0;
    pub const MD: f32 = 10.0;
    pub const LG: f32 = 20.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    /// Zoom button edge length.
    pub const CONTROL_BUTTON: f32 = 30.0;

    /// Collapsed layer control toggle.
    pub const LAYER_TOGGLE: f32 = 44.0;

    /// Popup bubble width limits.
    pub const POPUP_MIN_WIDTH: f32 = 50.0;
    pub const POPUP_MAX_WIDTH: f32 = 300.0;

    /// Popup tip triangle height.
    pub const POPUP_TIP: f32 = 10.0;

    /// Popup close button hit box.
    pub const POPUP_CLOSE: f32 = 24.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Zoom button glyphs.
    pub const CONTROL_GLYPH: f32 = 22.0;

    /// Layer control entries.
    pub const BODY: f32 = 14.0;

    /// Popup content.
    pub const POPUP: f32 = 13.0;

    /// Attribution line.
    pub const CAPTION: f32 = 12.0;

    /// Line height factor for popup text.
    pub const LINE_HEIGHT: f32 = 1.4;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::Color;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: Color::TRANSPARENT,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const CONTROL: Shadow = Shadow {
        color: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
        offset: Vector { x: 0.0, y: 1.0 },
        blur_radius: 5.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);

    assert!(sizing::POPUP_MAX_WIDTH > sizing::POPUP_MIN_WIDTH);

    assert!(typography::BODY > typography::POPUP);
    assert!(typography::POPUP > typography::CAPTION);

    assert!(border::WIDTH_MD > border::WIDTH_SM);
    assert!(radius::LG > radius::MD);
};
