//! Permission Definitions
//!
//! 简化 RBAC：按模块授权，admin 拿 "all"。

/// 可配置权限列表
pub const ALL_PERMISSIONS: &[&str] = &[
    "bookings:manage", // 预订查看/改状态/改联系人
    "rooms:manage",    // 房间增删改
    "layout:manage",   // 咖啡区布局
    "settings:manage", // 场馆设置
    "staff:manage",    // 员工账号
    "reports:view",    // 报表查看
];

/// Admin 默认权限
pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

/// 前台默认权限：处理预订 + 看报表
pub const DEFAULT_FRONT_DESK_PERMISSIONS: &[&str] = &["bookings:manage", "reports:view"];

/// Default permission set for a named profile
pub fn get_default_permissions(profile: &str) -> Vec<String> {
    let set: &[&str] = match profile {
        "admin" => DEFAULT_ADMIN_PERMISSIONS,
        "front_desk" => DEFAULT_FRONT_DESK_PERMISSIONS,
        _ => &[],
    };
    set.iter().map(|s| s.to_string()).collect()
}
