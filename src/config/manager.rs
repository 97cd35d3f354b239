//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    ToolSettings,
    loader,
};

/// 設定とワークスペースルートを保持し、相対パスを解決する
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ToolSettings,

    /// ワークスペースのルートパス
    workspace_root: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// カレントディレクトリをルートとするデフォルト設定で作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ToolSettings::default(), workspace_root: PathBuf::from(".") }
    }

    /// 設定を直接指定して作成する（テストや埋め込み用）
    ///
    /// # Errors
    /// - バリデーションエラー
    pub fn with_settings(
        workspace_root: impl Into<PathBuf>,
        settings: ToolSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        Ok(Self { current_settings: settings, workspace_root: workspace_root.into() })
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `workspace_root` - ワークスペースのルートパス
    ///
    /// # Returns
    /// - `Ok(())`: 設定の読み込みとバリデーション成功
    /// - `Err(ConfigError)`: エラー
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: PathBuf) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        // ワークスペースの設定を読み込み
        let settings =
            loader::load_from_workspace(&workspace_root)?.map_or_else(ToolSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            });

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 設定を保存
        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する
    pub fn update_settings(&mut self, new_settings: ToolSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        // バリデーション
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 設定を更新
        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ToolSettings {
        &self.current_settings
    }

    /// ワークスペースルートを取得
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// ワークスペース相対パスを解決する（絶対パスはそのまま）
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.workspace_root.join(path)
    }

    #[must_use]
    pub fn translation_dir(&self) -> PathBuf {
        self.resolve(&self.current_settings.translation_dir)
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(self.current_settings.effective_output_dir())
    }

    #[must_use]
    pub fn master_translation_file(&self) -> PathBuf {
        self.resolve(&self.current_settings.master_translation_file)
    }

    #[must_use]
    pub fn help_menu_file(&self) -> PathBuf {
        self.resolve(&self.current_settings.help_menu.config_file)
    }

    #[must_use]
    pub fn help_menu_output_dir(&self) -> PathBuf {
        self.resolve(&self.current_settings.help_menu.output_dir)
    }

    #[must_use]
    pub fn help_menu_image_dir(&self) -> PathBuf {
        self.resolve(&self.current_settings.help_menu.image_dir)
    }

    /// 追加で変換する画像（ワークスペース相対で解決済み）
    #[must_use]
    pub fn help_menu_extra_images(&self) -> Vec<PathBuf> {
        self.current_settings.help_menu.extra_images.iter().map(|path| self.resolve(path)).collect()
    }

    #[must_use]
    pub fn template_dir(&self) -> PathBuf {
        self.resolve(&self.current_settings.templates.template_dir)
    }

    #[must_use]
    pub fn versions_file(&self) -> PathBuf {
        self.resolve(&self.current_settings.templates.versions_file)
    }
}
