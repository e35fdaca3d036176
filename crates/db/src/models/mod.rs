pub mod comment;
pub mod congregation;
pub mod congregation_member;
pub mod device_token;
pub mod like;
pub mod notification;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use congregation::Congregation;
pub use congregation_member::{CongregationMember, MembershipStatus};
pub use device_token::{DevicePlatform, DeviceToken};
pub use like::Like;
pub use notification::{Notification, NotificationKind};
pub use post::Post;
pub use user::User;
