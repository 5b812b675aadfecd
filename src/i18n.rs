use serde::Serialize;
use utoipa::ToSchema;

use crate::model::Language;

/// Every user-visible string of the kiosk in one language.
#[derive(Debug)]
pub struct Messages {
    pub title: &'static str,
    pub scan_instructions: &'static str,
    pub qr_required: &'static str,
    pub qr_verified: &'static str,

    pub table_date: &'static str,
    pub table_name: &'static str,
    pub table_in: &'static str,
    pub table_out: &'static str,
    pub table_status: &'static str,

    pub success_in: &'static str,
    pub success_out: &'static str,
    pub success_action: &'static str,

    pub err_name_empty: &'static str,
    pub err_already_in: &'static str,
    pub err_not_in: &'static str,
    pub err_already_out: &'static str,
    pub err_qr_invalid: &'static str,
    pub err_qr_failed: &'static str,
    pub err_camera_denied: &'static str,
    pub err_scanner_unavailable: &'static str,
    pub err_admin_password: &'static str,
    pub err_record_not_found: &'static str,
    pub err_storage: &'static str,
}

static JA: Messages = Messages {
    title: "勤怠管理システム",
    scan_instructions: "「KUMAMOTO_HIGO」のQRコードをスキャンしてください。",
    qr_required: "打刻にはQRスキャンが必要です",
    qr_verified: "認証完了",
    table_date: "日付",
    table_name: "社員名",
    table_in: "出勤",
    table_out: "退勤",
    table_status: "状態",
    success_in: "出勤を記録しました！",
    success_out: "退勤を記録しました！",
    success_action: "更新しました。",
    err_name_empty: "名前を入力してください。",
    err_already_in: "既に出勤済みです。",
    err_not_in: "先に出勤をしてください。",
    err_already_out: "既に退勤済みです。",
    err_qr_invalid: "無効なQRコードです。",
    err_qr_failed: "スキャンに失敗しました。",
    err_camera_denied: "カメラへのアクセスを許可してください。",
    err_scanner_unavailable: "スキャナーを読み込めませんでした。",
    err_admin_password: "パスワードが正しくありません。",
    err_record_not_found: "記録が見つかりません。",
    err_storage: "保存に失敗しました。",
};

static EN: Messages = Messages {
    title: "Attendance System",
    scan_instructions: "Scan \"KUMAMOTO_HIGO\" QR code.",
    qr_required: "Scan QR to unlock buttons",
    qr_verified: "Verified",
    table_date: "Date",
    table_name: "Name",
    table_in: "In",
    table_out: "Out",
    table_status: "Status",
    success_in: "Clock-in recorded!",
    success_out: "Clock-out recorded!",
    success_action: "Updated.",
    err_name_empty: "Please enter name.",
    err_already_in: "Already clocked in.",
    err_not_in: "Clock in first.",
    err_already_out: "Already clocked out.",
    err_qr_invalid: "Invalid QR Code.",
    err_qr_failed: "Scan failed.",
    err_camera_denied: "Camera access denied.",
    err_scanner_unavailable: "Scanner could not be loaded.",
    err_admin_password: "Invalid Password",
    err_record_not_found: "Record not found.",
    err_storage: "Could not save.",
};

static ZH: Messages = Messages {
    title: "出勤管理系统",
    scan_instructions: "请扫描 \"KUMAMOTO_HIGO\" 二维码。",
    qr_required: "打卡前请先扫描二维码",
    qr_verified: "已认证",
    table_date: "日期",
    table_name: "姓名",
    table_in: "上班",
    table_out: "下班",
    table_status: "状态",
    success_in: "上班打卡成功！",
    success_out: "下班打卡成功！",
    success_action: "状态已更新。",
    err_name_empty: "请输入姓名。",
    err_already_in: "已完成上班打卡。",
    err_not_in: "请先打上班卡。",
    err_already_out: "已完成下班打卡。",
    err_qr_invalid: "无效二维码。",
    err_qr_failed: "扫描失败。",
    err_camera_denied: "请允许摄像头权限。",
    err_scanner_unavailable: "无法加载扫描器。",
    err_admin_password: "密码错误。",
    err_record_not_found: "未找到记录。",
    err_storage: "保存失败。",
};

pub fn messages(language: Language) -> &'static Messages {
    match language {
        Language::Ja => &JA,
        Language::En => &EN,
        Language::Zh => &ZH,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// Every toast the kiosk can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Verified,
    ClockedIn,
    ClockedOut,
    StatusUpdated,
    NameRequired,
    VerificationRequired,
    AlreadyClockedIn,
    NotClockedIn,
    AlreadyClockedOut,
    InvalidQrToken,
    ScanDecodeFailed,
    CameraAccessDenied,
    ScanLibraryUnavailable,
    InvalidAdminPassword,
    RecordNotFound,
    StorageFailed,
}

impl Notice {
    pub fn severity(self) -> Severity {
        match self {
            Notice::Verified | Notice::ClockedIn | Notice::ClockedOut | Notice::StatusUpdated => {
                Severity::Success
            }
            _ => Severity::Error,
        }
    }

    pub fn text(self, language: Language) -> &'static str {
        let m = messages(language);
        match self {
            Notice::Verified => m.qr_verified,
            Notice::ClockedIn => m.success_in,
            Notice::ClockedOut => m.success_out,
            Notice::StatusUpdated => m.success_action,
            Notice::NameRequired => m.err_name_empty,
            Notice::VerificationRequired => m.qr_required,
            Notice::AlreadyClockedIn => m.err_already_in,
            Notice::NotClockedIn => m.err_not_in,
            Notice::AlreadyClockedOut => m.err_already_out,
            Notice::InvalidQrToken => m.err_qr_invalid,
            Notice::ScanDecodeFailed => m.err_qr_failed,
            Notice::CameraAccessDenied => m.err_camera_denied,
            Notice::ScanLibraryUnavailable => m.err_scanner_unavailable,
            Notice::InvalidAdminPassword => m.err_admin_password,
            Notice::RecordNotFound => m.err_record_not_found,
            Notice::StorageFailed => m.err_storage,
        }
    }
}
