//! Display strings in English and Chinese

use serde::Deserialize;

/// Display language
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Zh,
}

/// Keys for fixed strings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum K {
    AppTitle,
    Loading,
    Connected,
    Connecting,
    Disconnected,
    LastUpdate,
    BannerTitle,
    StatsTitle,
    CurrentParticipants,
    PrizeSettings,
    BtnWaitingConnection,
    BtnWaitingParticipants,
    BtnStart,
    ParticipantsTitle,
    NoParticipants,
    WaitingKeyword,
    DrawingTitle,
    DrawingHint,
    ResultsTitle,
    BackHome,
    NoWinners,
    Congrats,
    Thanks,
    ErrorTitle,
    ErrorBody,
    SuggestedSolutions,
    FixReload,
    FixResize,
    FixPlainTerminal,
    KeysLobby,
    KeysDrawing,
    KeysResults,
    KeysFault,
    HelpTitle,
    HelpText,
}

pub fn t(lang: Lang, key: K) -> &'static str {
    match lang {
        Lang::En => en(key),
        Lang::Zh => zh(key),
    }
}

fn en(key: K) -> &'static str {
    match key {
        K::AppTitle => "🎉 Meshtastic Multi-Level Lottery System",
        K::Loading => "Loading lottery system...",
        K::Connected => "Connected",
        K::Connecting => "Connecting...",
        K::Disconnected => "Disconnected",
        K::LastUpdate => "Last update",
        K::BannerTitle => "Unable to connect to backend server",
        K::StatsTitle => " Participation Stats ",
        K::CurrentParticipants => "Current participants",
        K::PrizeSettings => " Prize Settings ",
        K::BtnWaitingConnection => "Waiting for connection...",
        K::BtnWaitingParticipants => "Waiting for participants...",
        K::BtnStart => "⚡ Press d to Start Lottery",
        K::ParticipantsTitle => "Participants",
        K::NoParticipants => "No participants yet",
        K::WaitingKeyword => "Waiting for users to send the lottery keyword...",
        K::DrawingTitle => "🎲 Drawing in progress...",
        K::DrawingHint => "Please wait, the system is randomly selecting lucky winners",
        K::ResultsTitle => "🎉 Lottery Results 🎉",
        K::BackHome => "Press b to go back to home",
        K::NoWinners => "No winners",
        K::Congrats => "Congratulations to all winners!",
        K::Thanks => "Thank you for participating in this Meshtastic lottery event",
        K::ErrorTitle => " An Error Occurred ",
        K::ErrorBody => "The display encountered an error while rendering.",
        K::SuggestedSolutions => "Suggested solutions:",
        K::FixReload => "Press r to reload the display and try again",
        K::FixResize => "Resize or enlarge the terminal window",
        K::FixPlainTerminal => "Restart in a plain terminal session (no multiplexer or overlays)",
        K::KeysLobby => " d:draw | r:refresh | ↑/↓:scroll | ?:help | q:quit ",
        K::KeysDrawing => " drawing... | ?:help | q:quit ",
        K::KeysResults => " b:back to home | r:refresh | ↑/↓:scroll | ?:help | q:quit ",
        K::KeysFault => " r:reload | q:quit ",
        K::HelpTitle => " Help ",
        K::HelpText => r#"
 LOTTERY DISPLAY - Keyboard Shortcuts

 LOBBY
   d                  Start the lottery draw
   ↑ / ↓              Scroll participant list

 RESULTS
   b                  Back to home (resets the lottery)
   ↑ / ↓              Scroll winners

 GENERAL
   r                  Refresh status now
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#,
    }
}

fn zh(key: K) -> &'static str {
    match key {
        K::AppTitle => "🎉 Meshtastic 多等级抽奖系统",
        K::Loading => "正在加载抽奖系统...",
        K::Connected => "已连接",
        K::Connecting => "连接中...",
        K::Disconnected => "已断开",
        K::LastUpdate => "最近更新",
        K::BannerTitle => "无法连接到后端服务器",
        K::StatsTitle => " 参与统计 ",
        K::CurrentParticipants => "当前参与人数",
        K::PrizeSettings => " 奖项设置 ",
        K::BtnWaitingConnection => "等待连接...",
        K::BtnWaitingParticipants => "等待参与者...",
        K::BtnStart => "⚡ 按 d 开始抽奖",
        K::ParticipantsTitle => "参与者名单",
        K::NoParticipants => "暂无参与者",
        K::WaitingKeyword => "等待用户发送抽奖关键词...",
        K::DrawingTitle => "🎲 正在抽奖...",
        K::DrawingHint => "请稍候，系统正在随机抽取幸运儿",
        K::ResultsTitle => "🎉 抽奖结果 🎉",
        K::BackHome => "按 b 返回首页",
        K::NoWinners => "暂无获奖者",
        K::Congrats => "恭喜所有获奖者！",
        K::Thanks => "感谢参与本次 Meshtastic 抽奖活动",
        K::ErrorTitle => " 发生错误 ",
        K::ErrorBody => "显示程序在渲染时发生错误。",
        K::SuggestedSolutions => "建议的解决方法：",
        K::FixReload => "按 r 重新加载显示并重试",
        K::FixResize => "调整或放大终端窗口",
        K::FixPlainTerminal => "在普通终端会话中重新启动（不使用复用器或覆盖层）",
        K::KeysLobby => " d:抽奖 | r:刷新 | ↑/↓:滚动 | ?:帮助 | q:退出 ",
        K::KeysDrawing => " 抽奖中... | ?:帮助 | q:退出 ",
        K::KeysResults => " b:返回首页 | r:刷新 | ↑/↓:滚动 | ?:帮助 | q:退出 ",
        K::KeysFault => " r:重新加载 | q:退出 ",
        K::HelpTitle => " 帮助 ",
        K::HelpText => r#"
 抽奖显示 - 快捷键

 首页
   d                  开始抽奖
   ↑ / ↓              滚动参与者名单

 结果
   b                  返回首页（重置抽奖）
   ↑ / ↓              滚动获奖名单

 通用
   r                  立即刷新状态
   ?                  显示/隐藏帮助
   q / Ctrl+C         退出

 按任意键关闭...
"#,
    }
}

/// Text around the keyword in the join instruction
pub fn join_instruction_parts(lang: Lang) -> (&'static str, &'static str) {
    match lang {
        Lang::En => ("Send \"", "\" to participate in lottery"),
        Lang::Zh => ("发送“", "”参与抽奖"),
    }
}

pub fn join_instruction(lang: Lang, keyword: &str) -> String {
    let (before, after) = join_instruction_parts(lang);
    format!("{before}{keyword}{after}")
}

pub fn wait_for_keyword(lang: Lang, keyword: &str) -> String {
    match lang {
        Lang::En => format!("Please wait for users to send \"{keyword}\" to participate in lottery"),
        Lang::Zh => format!("请等待用户发送“{keyword}”参与抽奖"),
    }
}

pub fn backend_hint(lang: Lang, url: &str) -> String {
    match lang {
        Lang::En => format!("Please ensure the backend server is running at {url}"),
        Lang::Zh => format!("请确认后端服务器正在 {url} 运行"),
    }
}

pub fn winners_count(lang: Lang, n: usize) -> String {
    match lang {
        Lang::En => format!("{n} winners"),
        Lang::Zh => format!("{n} 名"),
    }
}

pub fn people_count(lang: Lang, n: usize) -> String {
    match lang {
        Lang::En => format!("{n} people"),
        Lang::Zh => format!("{n} 人"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_differ() {
        assert_ne!(t(Lang::En, K::ResultsTitle), t(Lang::Zh, K::ResultsTitle));
        assert_eq!(people_count(Lang::Zh, 3), "3 人");
        assert_eq!(winners_count(Lang::En, 1), "1 winners");
    }

    #[test]
    fn test_keyword_is_embedded() {
        assert!(join_instruction(Lang::En, "I want to join lottery").contains("\"I want to join lottery\""));
        assert!(wait_for_keyword(Lang::Zh, "我要抽奖").contains("我要抽奖"));
    }
}
