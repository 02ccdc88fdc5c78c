//! Built-in theme stylesheet.
//!
//! Every base style is defined here. State rules (`button:active`) only
//! list what differs from the base; the rest is inherited.

/// The default theme, applied before any user stylesheet.
pub const DEFAULT_THEME: &str = r#"
/* Palette */
$black-500: #333333;
$silver-100: #fafafa;
$silver-300: #d4d4d4;

$base-color: white;
$text-color: $black-500;
$bg-color: shade($base-color, 0.96);
$bg-highlight-color: white;
$border-color: rgba(0, 0, 0, 0.25);
$inset-dark-color: rgba(0, 0, 0, 0.06);
$insensitive-color: mix($text-color, $bg-color, 0.31);
$accent: #3d9bda;
$selected-bg-color: #3d9bda;
$selected-fg-color: white;
$text-shadow-color: rgba(255, 255, 255, 0.4);
$titlebar-color: mix($silver-300, $silver-100, 0.25);
$text-color-primary: shade($titlebar-color, 0.5);
$text-color-primary-shadow: alpha(shade($titlebar-color, 1.4), 0.4);

background {
    border-radius: 2.5px;
    border-width: 1px;
    padding: 12px;
    background-color: $bg-color;
    border-color: rgba(0, 0, 0, 0.27);
}

button, suggested-action {
    border-radius: 2.5px;
    border-width: 1px;
    padding: 3px 12px;
    box-shadow: inset 0 0 0 1px alpha($bg-highlight-color, 0.05),
                inset 0 1px 0 0 alpha($bg-highlight-color, 0.45),
                inset 0 -1px 0 0 alpha($bg-highlight-color, 0.15),
                0 1px 0 0 alpha($bg-highlight-color, 0.15);
}

button {
    border-color: $border-color;
    color: $text-color;
    background-image: linear-gradient(transparent, transparent, rgba(0, 0, 0, 0.04));
    text-shadow: 0 1px $text-shadow-color;
}

button:active {
    border-color: rgba(0, 0, 0, 0.27);
    background-color: rgba(0, 0, 0, 0.05);
    background-image: none;
    box-shadow: inset 0 0 0 1px rgba(0, 0, 0, 0.05),
                0 1px 0 0 alpha($bg-highlight-color, 0.3);
}

button:disabled {
    border-color: rgba(0, 0, 0, 0.2);
    color: $insensitive-color;
    background-color: transparent;
    background-image: none;
    text-shadow: none;
}

suggested-action {
    border-color: shade($selected-bg-color, 0.8);
    color: $selected-fg-color;
    background-image: linear-gradient(shade($selected-bg-color, 1.1), shade($selected-bg-color, 0.9));
    text-shadow: 0 1px rgba(0, 0, 0, 0.3);
}

suggested-action:active {
    background-image: linear-gradient(shade($selected-bg-color, 1.05), shade($selected-bg-color, 0.95));
    box-shadow: none;
}

text-entry {
    border-radius: 2.5px;
    border-width: 1px;
    padding: 3px;
    color: $text-color;
    border-color: $border-color;
    background-image: linear-gradient(shade($base-color, 0.93), shade($base-color, 0.97));
    text-shadow: 0 1px $text-shadow-color;
    box-shadow: inset 0 1px 0 0 alpha($inset-dark-color, 0.7),
                inset 0 0 0 1px alpha($inset-dark-color, 0.3),
                0 1px 0 0 alpha($bg-highlight-color, 0.3);
}

text-entry:focus {
    border-color: alpha($accent, 0.8);
    box-shadow: inset 0 0 0 1px alpha($accent, 0.23),
                0 1px 0 0 alpha($bg-highlight-color, 0.3);
}

label {
    background-color: transparent;
    color: $text-color;
}

title-label {
    background-color: transparent;
    color: $text-color-primary;
    font-weight: bold;
    text-shadow: 0 1px $text-color-primary-shadow;
}

/* Text selection highlight */
selection {
    color: $selected-fg-color;
    background-color: $selected-bg-color;
}
"#;
