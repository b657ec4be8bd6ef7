// keys.rs — key code table shared with the input layer

// ============================================================
// Key constants
// ============================================================

pub const K_TAB: i32 = 9;
pub const K_ENTER: i32 = 13;
pub const K_ESCAPE: i32 = 27;
pub const K_SPACE: i32 = 32;
pub const K_BACKSPACE: i32 = 127;
pub const K_UPARROW: i32 = 128;
pub const K_DOWNARROW: i32 = 129;
pub const K_LEFTARROW: i32 = 130;
pub const K_RIGHTARROW: i32 = 131;
pub const K_ALT: i32 = 132;
pub const K_CTRL: i32 = 133;
pub const K_SHIFT: i32 = 134;
pub const K_F1: i32 = 135;
pub const K_F2: i32 = 136;
pub const K_F3: i32 = 137;
pub const K_F4: i32 = 138;
pub const K_F5: i32 = 139;
pub const K_F6: i32 = 140;
pub const K_F7: i32 = 141;
pub const K_F8: i32 = 142;
pub const K_F9: i32 = 143;
pub const K_F10: i32 = 144;
pub const K_F11: i32 = 145;
pub const K_F12: i32 = 146;
pub const K_INS: i32 = 147;
pub const K_DEL: i32 = 148;
pub const K_PGDN: i32 = 149;
pub const K_PGUP: i32 = 150;
pub const K_HOME: i32 = 151;
pub const K_END: i32 = 152;

pub const K_KP_HOME: i32 = 160;
pub const K_KP_UPARROW: i32 = 161;
pub const K_KP_PGUP: i32 = 162;
pub const K_KP_LEFTARROW: i32 = 163;
pub const K_KP_5: i32 = 164;
pub const K_KP_RIGHTARROW: i32 = 165;
pub const K_KP_END: i32 = 166;
pub const K_KP_DOWNARROW: i32 = 167;
pub const K_KP_PGDN: i32 = 168;
pub const K_KP_ENTER: i32 = 169;
pub const K_KP_INS: i32 = 170;
pub const K_KP_DEL: i32 = 171;
pub const K_KP_SLASH: i32 = 172;
pub const K_KP_MINUS: i32 = 173;
pub const K_KP_PLUS: i32 = 174;

pub const K_MOUSE1: i32 = 200;
pub const K_MOUSE2: i32 = 201;
pub const K_MOUSE3: i32 = 202;

pub const K_JOY1: i32 = 203;
pub const K_JOY2: i32 = 204;
pub const K_JOY3: i32 = 205;
pub const K_JOY4: i32 = 206;

pub const K_AUX1: i32 = 207;
pub const K_AUX2: i32 = 208;
pub const K_AUX3: i32 = 209;
pub const K_AUX4: i32 = 210;
pub const K_AUX5: i32 = 211;
pub const K_AUX6: i32 = 212;
pub const K_AUX7: i32 = 213;
pub const K_AUX8: i32 = 214;
pub const K_AUX9: i32 = 215;
pub const K_AUX10: i32 = 216;
pub const K_AUX11: i32 = 217;
pub const K_AUX12: i32 = 218;
pub const K_AUX13: i32 = 219;
pub const K_AUX14: i32 = 220;
pub const K_AUX15: i32 = 221;
pub const K_AUX16: i32 = 222;
pub const K_AUX17: i32 = 223;
pub const K_AUX18: i32 = 224;
pub const K_AUX19: i32 = 225;
pub const K_AUX20: i32 = 226;
pub const K_AUX21: i32 = 227;
pub const K_AUX22: i32 = 228;
pub const K_AUX23: i32 = 229;
pub const K_AUX24: i32 = 230;
pub const K_AUX25: i32 = 231;
pub const K_AUX26: i32 = 232;
pub const K_AUX27: i32 = 233;
pub const K_AUX28: i32 = 234;
pub const K_AUX29: i32 = 235;
pub const K_AUX30: i32 = 236;
pub const K_AUX31: i32 = 237;
pub const K_AUX32: i32 = 238;

pub const K_MWHEELDOWN: i32 = 239;
pub const K_MWHEELUP: i32 = 240;

pub const K_MOUSE4: i32 = 241;
pub const K_MOUSE5: i32 = 242;

pub const K_PAUSE: i32 = 255;
