/// Topic categories that are not news: film, TV, music, games, books.
///
/// Matched as substrings of the title; Latin entries match case-insensitively.
pub const CATEGORY_DENYLIST: &[&str] = &[
    "电影", "综艺", "剧集", "音乐", "影视", "节目", "剧场版", "动画", "漫画", "小说",
    "图书", "专辑", "游戏", "movie", "album", "soundtrack", "anime", "manga", "trailer",
];
