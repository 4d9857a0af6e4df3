use rand::Rng;

pub const PHOTO_CAPTION: &str = "📸 Случайное фото";

/// Photos served by `/photo`.
const PHOTO_URLS: &[&str] = &[
    "https://picsum.photos/id/1015/1024/768",
    "https://picsum.photos/id/1016/1024/768",
    "https://picsum.photos/id/1018/1024/768",
    "https://picsum.photos/id/1036/1024/768",
    "https://picsum.photos/id/1039/1024/768",
    "https://picsum.photos/id/1043/1024/768",
];

/// Fixed set of photo URLs, one picked uniformly per request.
#[derive(Debug, Clone)]
pub struct PhotoPool {
    urls: &'static [&'static str],
}

impl PhotoPool {
    pub fn new() -> Self {
        Self { urls: PHOTO_URLS }
    }

    pub fn pick(&self) -> &'static str {
        let idx = rand::thread_rng().gen_range(0..self.urls.len());
        self.urls[idx]
    }
}
