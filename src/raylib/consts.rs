//! raylib 枚举常量与预定义颜色
//!
//! 数值与 raylib 2.6 头文件一致；`ALL` 列出所有安装到脚本全局对象上的常量。

use super::types::Color;

macro_rules! constants {
    ($($name:ident = $value:expr;)*) => {
        $(pub const $name: i32 = $value;)*

        /// 所有导出到脚本的整数常量
        pub const ALL: &[(&str, i32)] = &[$((stringify!($name), $name)),*];
    };
}

constants! {
    // ConfigFlag
    FLAG_SHOW_LOGO = 1;
    FLAG_FULLSCREEN_MODE = 2;
    FLAG_WINDOW_RESIZABLE = 4;
    FLAG_WINDOW_UNDECORATED = 8;
    FLAG_WINDOW_TRANSPARENT = 16;
    FLAG_MSAA_4X_HINT = 32;
    FLAG_VSYNC_HINT = 64;
    FLAG_WINDOW_HIDDEN = 128;

    // TraceLogType
    LOG_ALL = 0;
    LOG_TRACE = 1;
    LOG_DEBUG = 2;
    LOG_INFO = 3;
    LOG_WARNING = 4;
    LOG_ERROR = 5;
    LOG_FATAL = 6;
    LOG_NONE = 7;

    // KeyboardKey
    KEY_APOSTROPHE = 39;
    KEY_COMMA = 44;
    KEY_MINUS = 45;
    KEY_PERIOD = 46;
    KEY_SLASH = 47;
    KEY_ZERO = 48;
    KEY_ONE = 49;
    KEY_TWO = 50;
    KEY_THREE = 51;
    KEY_FOUR = 52;
    KEY_FIVE = 53;
    KEY_SIX = 54;
    KEY_SEVEN = 55;
    KEY_EIGHT = 56;
    KEY_NINE = 57;
    KEY_SEMICOLON = 59;
    KEY_EQUAL = 61;
    KEY_A = 65;
    KEY_B = 66;
    KEY_C = 67;
    KEY_D = 68;
    KEY_E = 69;
    KEY_F = 70;
    KEY_G = 71;
    KEY_H = 72;
    KEY_I = 73;
    KEY_J = 74;
    KEY_K = 75;
    KEY_L = 76;
    KEY_M = 77;
    KEY_N = 78;
    KEY_O = 79;
    KEY_P = 80;
    KEY_Q = 81;
    KEY_R = 82;
    KEY_S = 83;
    KEY_T = 84;
    KEY_U = 85;
    KEY_V = 86;
    KEY_W = 87;
    KEY_X = 88;
    KEY_Y = 89;
    KEY_Z = 90;
    KEY_SPACE = 32;
    KEY_ESCAPE = 256;
    KEY_ENTER = 257;
    KEY_TAB = 258;
    KEY_BACKSPACE = 259;
    KEY_INSERT = 260;
    KEY_DELETE = 261;
    KEY_RIGHT = 262;
    KEY_LEFT = 263;
    KEY_DOWN = 264;
    KEY_UP = 265;
    KEY_PAGE_UP = 266;
    KEY_PAGE_DOWN = 267;
    KEY_HOME = 268;
    KEY_END = 269;
    KEY_CAPS_LOCK = 280;
    KEY_SCROLL_LOCK = 281;
    KEY_NUM_LOCK = 282;
    KEY_PRINT_SCREEN = 283;
    KEY_PAUSE = 284;
    KEY_F1 = 290;
    KEY_F2 = 291;
    KEY_F3 = 292;
    KEY_F4 = 293;
    KEY_F5 = 294;
    KEY_F6 = 295;
    KEY_F7 = 296;
    KEY_F8 = 297;
    KEY_F9 = 298;
    KEY_F10 = 299;
    KEY_F11 = 300;
    KEY_F12 = 301;
    KEY_LEFT_SHIFT = 340;
    KEY_LEFT_CONTROL = 341;
    KEY_LEFT_ALT = 342;
    KEY_LEFT_SUPER = 343;
    KEY_RIGHT_SHIFT = 344;
    KEY_RIGHT_CONTROL = 345;
    KEY_RIGHT_ALT = 346;
    KEY_RIGHT_SUPER = 347;
    KEY_KB_MENU = 348;
    KEY_LEFT_BRACKET = 91;
    KEY_BACKSLASH = 92;
    KEY_RIGHT_BRACKET = 93;
    KEY_GRAVE = 96;
    KEY_KP_0 = 320;
    KEY_KP_1 = 321;
    KEY_KP_2 = 322;
    KEY_KP_3 = 323;
    KEY_KP_4 = 324;
    KEY_KP_5 = 325;
    KEY_KP_6 = 326;
    KEY_KP_7 = 327;
    KEY_KP_8 = 328;
    KEY_KP_9 = 329;
    KEY_KP_DECIMAL = 330;
    KEY_KP_DIVIDE = 331;
    KEY_KP_MULTIPLY = 332;
    KEY_KP_SUBTRACT = 333;
    KEY_KP_ADD = 334;
    KEY_KP_ENTER = 335;
    KEY_KP_EQUAL = 336;

    // AndroidButton
    KEY_BACK = 4;
    KEY_MENU = 82;
    KEY_VOLUME_UP = 24;
    KEY_VOLUME_DOWN = 25;

    // MouseButton
    MOUSE_LEFT_BUTTON = 0;
    MOUSE_RIGHT_BUTTON = 1;
    MOUSE_MIDDLE_BUTTON = 2;

    // GamepadNumber
    GAMEPAD_PLAYER1 = 0;
    GAMEPAD_PLAYER2 = 1;
    GAMEPAD_PLAYER3 = 2;
    GAMEPAD_PLAYER4 = 3;

    // GamepadButton
    GAMEPAD_BUTTON_UNKNOWN = 0;
    GAMEPAD_BUTTON_LEFT_FACE_UP = 1;
    GAMEPAD_BUTTON_LEFT_FACE_RIGHT = 2;
    GAMEPAD_BUTTON_LEFT_FACE_DOWN = 3;
    GAMEPAD_BUTTON_LEFT_FACE_LEFT = 4;
    GAMEPAD_BUTTON_RIGHT_FACE_UP = 5;
    GAMEPAD_BUTTON_RIGHT_FACE_RIGHT = 6;
    GAMEPAD_BUTTON_RIGHT_FACE_DOWN = 7;
    GAMEPAD_BUTTON_RIGHT_FACE_LEFT = 8;
    GAMEPAD_BUTTON_LEFT_TRIGGER_1 = 9;
    GAMEPAD_BUTTON_LEFT_TRIGGER_2 = 10;
    GAMEPAD_BUTTON_RIGHT_TRIGGER_1 = 11;
    GAMEPAD_BUTTON_RIGHT_TRIGGER_2 = 12;
    GAMEPAD_BUTTON_MIDDLE_LEFT = 13;
    GAMEPAD_BUTTON_MIDDLE = 14;
    GAMEPAD_BUTTON_MIDDLE_RIGHT = 15;
    GAMEPAD_BUTTON_LEFT_THUMB = 16;
    GAMEPAD_BUTTON_RIGHT_THUMB = 17;

    // GamepadAxis
    GAMEPAD_AXIS_UNKNOWN = 0;
    GAMEPAD_AXIS_LEFT_X = 1;
    GAMEPAD_AXIS_LEFT_Y = 2;
    GAMEPAD_AXIS_RIGHT_X = 3;
    GAMEPAD_AXIS_RIGHT_Y = 4;
    GAMEPAD_AXIS_LEFT_TRIGGER = 5;
    GAMEPAD_AXIS_RIGHT_TRIGGER = 6;

    // PixelFormat
    UNCOMPRESSED_GRAYSCALE = 1;
    UNCOMPRESSED_GRAY_ALPHA = 2;
    UNCOMPRESSED_R5G6B5 = 3;
    UNCOMPRESSED_R8G8B8 = 4;
    UNCOMPRESSED_R5G5B5A1 = 5;
    UNCOMPRESSED_R4G4B4A4 = 6;
    UNCOMPRESSED_R8G8B8A8 = 7;
    UNCOMPRESSED_R32 = 8;
    UNCOMPRESSED_R32G32B32 = 9;
    UNCOMPRESSED_R32G32B32A32 = 10;
    COMPRESSED_DXT1_RGB = 11;
    COMPRESSED_DXT1_RGBA = 12;
    COMPRESSED_DXT3_RGBA = 13;
    COMPRESSED_DXT5_RGBA = 14;
    COMPRESSED_ETC1_RGB = 15;
    COMPRESSED_ETC2_RGB = 16;
    COMPRESSED_ETC2_EAC_RGBA = 17;
    COMPRESSED_PVRT_RGB = 18;
    COMPRESSED_PVRT_RGBA = 19;
    COMPRESSED_ASTC_4X4_RGBA = 20;
    COMPRESSED_ASTC_8X8_RGBA = 21;

    // TextureFilterMode
    FILTER_POINT = 1;
    FILTER_BILINEAR = 2;
    FILTER_TRILINEAR = 3;
    FILTER_ANISOTROPIC_4X = 4;
    FILTER_ANISOTROPIC_8X = 5;
    FILTER_ANISOTROPIC_16X = 6;

    // CubemapLayoutType
    CUBEMAP_AUTO_DETECT = 0;
    CUBEMAP_LINE_VERTICAL = 1;
    CUBEMAP_LINE_HORIZONTAL = 2;
    CUBEMAP_CROSS_THREE_BY_FOUR = 3;
    CUBEMAP_CROSS_FOUR_BY_THREE = 4;
    CUBEMAP_PANORAMA = 5;

    // TextureWrapMode
    WRAP_REPEAT = 0;
    WRAP_CLAMP = 1;
    WRAP_MIRROR_REPEAT = 2;
    WRAP_MIRROR_CLAMP = 3;

    // FontType
    FONT_DEFAULT = 0;
    FONT_BITMAP = 1;
    FONT_SDF = 2;

    // BlendMode
    BLEND_ALPHA = 0;
    BLEND_ADDITIVE = 1;
    BLEND_MULTIPLIED = 2;

    // GestureType
    GESTURE_NONE = 0;
    GESTURE_TAP = 1;
    GESTURE_DOUBLETAP = 2;
    GESTURE_HOLD = 4;
    GESTURE_DRAG = 8;
    GESTURE_SWIPE_RIGHT = 16;
    GESTURE_SWIPE_LEFT = 32;
    GESTURE_SWIPE_UP = 64;
    GESTURE_SWIPE_DOWN = 128;
    GESTURE_PINCH_IN = 256;
    GESTURE_PINCH_OUT = 512;

    // CameraMode
    CAMERA_CUSTOM = 0;
    CAMERA_FREE = 1;
    CAMERA_ORBITAL = 2;
    CAMERA_FIRST_PERSON = 3;
    CAMERA_THIRD_PERSON = 4;

    // CameraType
    CAMERA_PERSPECTIVE = 0;
    CAMERA_ORTHOGRAPHIC = 1;

    // NPatchType
    NPT_9PATCH = 0;
    NPT_3PATCH_VERTICAL = 1;
    NPT_3PATCH_HORIZONTAL = 2;
}

/// raylib 预定义调色板
pub const COLORS: &[(&str, Color)] = &[
    ("LIGHTGRAY", Color::new(200, 200, 200, 255)),
    ("GRAY", Color::new(130, 130, 130, 255)),
    ("DARKGRAY", Color::new(80, 80, 80, 255)),
    ("YELLOW", Color::new(253, 249, 0, 255)),
    ("GOLD", Color::new(255, 203, 0, 255)),
    ("ORANGE", Color::new(255, 161, 0, 255)),
    ("PINK", Color::new(255, 109, 194, 255)),
    ("RED", Color::new(230, 41, 55, 255)),
    ("MAROON", Color::new(190, 33, 55, 255)),
    ("GREEN", Color::new(0, 228, 48, 255)),
    ("LIME", Color::new(0, 158, 47, 255)),
    ("DARKGREEN", Color::new(0, 117, 44, 255)),
    ("SKYBLUE", Color::new(102, 191, 255, 255)),
    ("BLUE", Color::new(0, 121, 241, 255)),
    ("DARKBLUE", Color::new(0, 82, 172, 255)),
    ("PURPLE", Color::new(200, 122, 255, 255)),
    ("VIOLET", Color::new(135, 60, 190, 255)),
    ("DARKPURPLE", Color::new(112, 31, 126, 255)),
    ("BEIGE", Color::new(211, 176, 131, 255)),
    ("BROWN", Color::new(127, 106, 79, 255)),
    ("DARKBROWN", Color::new(76, 63, 47, 255)),
    ("WHITE", Color::new(255, 255, 255, 255)),
    ("BLACK", Color::new(0, 0, 0, 255)),
    ("BLANK", Color::new(0, 0, 0, 0)),
    ("MAGENTA", Color::new(255, 0, 255, 255)),
    ("RAYWHITE", Color::new(245, 245, 245, 255)),
];

pub const WHITE: Color = Color::new(255, 255, 255, 255);
pub const BLACK: Color = Color::new(0, 0, 0, 255);
pub const BLANK: Color = Color::new(0, 0, 0, 0);
pub const MAGENTA: Color = Color::new(255, 0, 255, 255);
pub const RED: Color = Color::new(230, 41, 55, 255);
pub const BLUE: Color = Color::new(0, 121, 241, 255);
pub const RAYWHITE: Color = Color::new(245, 245, 245, 255);
